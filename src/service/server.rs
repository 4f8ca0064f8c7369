use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use tracing::{debug, error, info, warn};

use super::protocol::{write_answer, write_error, Command};
use crate::completion::index::{CompletionIndex, PrecomputedCompletionIndex};

/// Accepts clients forever, serving each one on its own thread.
pub fn serve(listener: TcpListener, index: Arc<PrecomputedCompletionIndex>) -> io::Result<()> {
    info!(address = %listener.local_addr()?, "server started");
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(err) => {
                warn!("failed to accept a connection: {}", err);
                continue;
            }
        };
        let index = Arc::clone(&index);
        thread::spawn(move || {
            let peer = stream.peer_addr().ok();
            if let Err(err) = handle_connection(stream, index.as_ref()) {
                error!(?peer, "connection failed: {}", err);
            }
        });
    }
    Ok(())
}

/// Answers commands from one client until it sends `shutdown` or hangs up.
pub fn handle_connection<I: CompletionIndex + ?Sized>(stream: TcpStream, index: &I) -> io::Result<()> {
    let mut writer = BufWriter::new(stream.try_clone()?);
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            debug!("client disconnected");
            return Ok(());
        }
        match Command::parse(&line) {
            Ok(Command::Get(prefix)) => {
                write_answer(&mut writer, &index.ten_best(&prefix))?;
            }
            Ok(Command::Shutdown) => {
                debug!("client closed the session");
                writer.flush()?;
                return writer.get_ref().shutdown(std::net::Shutdown::Both);
            }
            Err(err) => {
                warn!("{}", err);
                write_error(&mut writer, &err)?;
            }
        }
        writer.flush()?;
    }
}
