use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};

use tracing::{error, info};

use crate::clients::ServiceClients;

pub mod api;
pub mod routes;

/// Shared per-server state. Requests are handled one at a time on the accept
/// loop; the optimizer itself allocates fresh state per invocation.
pub struct ServerState {
    pub clients: ServiceClients,
}

pub fn run_server(bind_addr: &str, state: &ServerState) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    info!("vivarium server listening on http://{bind_addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(state, &mut stream) {
                    error!("request error: {err}");
                }
            }
            Err(err) => error!("connection failed: {err}"),
        }
    }

    Ok(())
}

fn handle_connection(state: &ServerState, stream: &mut TcpStream) -> std::io::Result<()> {
    let mut buffer = [0_u8; 65_536];
    let bytes_read = stream.read(&mut buffer)?;
    if bytes_read == 0 {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&buffer[..bytes_read]);
    let mut lines = request.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let body = request
        .split("\r\n\r\n")
        .nth(1)
        .or_else(|| request.split("\n\n").nth(1))
        .unwrap_or("");

    let response = routes::route_request(state, method, path, body).to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}
