use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use crate::completion::index::CompletionIndex;
use crate::completion::{Error, Result};

/// Reads a question count and that many prefixes from `input` and writes the
/// ten best completions of each, one word per line. Answers are separated by
/// an empty line.
pub fn answer_questions<R, W, I>(input: &mut R, output: &mut W, index: &I) -> Result<()>
where
    R: BufRead,
    W: Write,
    I: CompletionIndex + ?Sized,
{
    answer_questions_with(input, output, |question| {
        Ok(index.ten_best(question).words().map(str::to_string).collect())
    })
}

/// Same as `answer_questions`, with the answers supplied by `answer`.
pub fn answer_questions_with<R, W, F>(input: &mut R, output: &mut W, mut answer: F) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Result<Vec<String>>,
{
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::MissingHeader);
    }
    let count: usize = line
        .trim()
        .parse()
        .map_err(|_| Error::InvalidHeader(line.trim_end().to_string()))?;

    let mut answered = 0;
    for i in 0..count {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            warn!(expected = count, read = i, "input ended before the announced question count");
            break;
        }
        let question = line.trim_end_matches(&['\r', '\n'][..]);
        if i > 0 {
            writeln!(output)?;
        }
        for word in answer(question)? {
            writeln!(output, "{}", word)?;
        }
        answered += 1;
        if i % 1000 == 0 {
            debug!(answered = i, "answering questions");
        }
    }
    output.flush()?;
    info!(questions = answered, "all questions answered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::index::{Completer, ThreadSafety};
    use crate::completion::loader;
    use std::io::Cursor;

    const INPUT: &str = "5\nkare 10\nkanojo 20\nkaretachi 1\nkorosu 7\nsakura 3\n3\nk\nka\nkar\n";

    #[test]
    fn answers_from_dictionary_and_questions_on_one_input() {
        for mode in [ThreadSafety::None, ThreadSafety::ThreadSafe] {
            let mut input = Cursor::new(INPUT);
            let index = Completer::build(loader::load(&mut input).unwrap(), mode);
            let mut output = Vec::new();
            answer_questions(&mut input, &mut output, &index).unwrap();
            assert_eq!(
                String::from_utf8(output).unwrap(),
                "kanojo\nkare\nkorosu\nkaretachi\n\nkanojo\nkare\nkaretachi\n\nkare\nkaretachi\n"
            );
        }
    }

    #[test]
    fn unknown_prefix_gives_empty_answer() {
        let mut input = Cursor::new("1\nkare 10\n2\nz\nk\n");
        let index = Completer::build(loader::load(&mut input).unwrap(), ThreadSafety::None);
        let mut output = Vec::new();
        answer_questions(&mut input, &mut output, &index).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "\nkare\n");
    }

    #[test]
    fn stops_when_questions_run_out() {
        let mut input = Cursor::new("2\nkare 10\nzzz 3\n3\nk\n");
        let index = Completer::build(loader::load(&mut input).unwrap(), ThreadSafety::None);
        let mut output = Vec::new();
        answer_questions(&mut input, &mut output, &index).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "kare\n");
    }

    #[test]
    fn answers_come_from_the_supplied_source() {
        let mut input = Cursor::new("3\nk\nka\n");
        let mut output = Vec::new();
        let mut asked = Vec::new();
        answer_questions_with(&mut input, &mut output, |question| {
            asked.push(question.to_string());
            Ok(vec![format!("{}!", question)])
        })
        .unwrap();
        assert_eq!(asked, vec!["k", "ka"]);
        assert_eq!(String::from_utf8(output).unwrap(), "k!\n\nka!\n");
    }

    #[test]
    fn missing_question_count_is_an_error() {
        let mut input = Cursor::new("1\nkare 10\n");
        let index = Completer::build(loader::load(&mut input).unwrap(), ThreadSafety::None);
        let mut output = Vec::new();
        assert!(matches!(
            answer_questions(&mut input, &mut output, &index),
            Err(Error::MissingHeader)
        ));
    }
}
