use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use ringctl::SOCKET_PATH;
use ringctl::protocol::Command;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

pub async fn run_server(tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if fs_err::metadata(SOCKET_PATH).is_ok() {
        let _ = fs_err::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", SOCKET_PATH, e);
            return;
        }
    };
    log::info!("Listening on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(serve_client(stream, tx.clone()));
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

async fn serve_client(stream: UnixStream, tx: Sender<AppEvent>) {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                log::warn!("Rejected '{}': {}", line.trim(), e);
                continue;
            }
        };

        let (event, reply) = into_event(command);
        if tx.send(event).await.is_err() {
            break;
        }
        if let Some(reply) = reply
            && let Ok(answer) = reply.recv().await
            && writer.write_all(format!("{answer}\n").as_bytes()).await.is_err()
        {
            break;
        }
    }
}

/// Commands that are answered get a channel the event loop replies on.
fn into_event(command: Command) -> (AppEvent, Option<Receiver<String>>) {
    match command {
        Command::Status(menu) => {
            let (reply_tx, reply_rx) = async_channel::bounded(1);
            (AppEvent::Status(menu, Some(reply_tx)), Some(reply_rx))
        }
        other => (AppEvent::from(other), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_status_is_answered_on_the_socket() {
        let (client, server) = UnixStream::pair().unwrap();
        let (tx, rx) = async_channel::unbounded();
        tokio::spawn(serve_client(server, tx));

        let (client_read, mut client_write) = client.into_split();
        client_write
            .write_all(b"toggle main\nspin main\nstatus main\n")
            .await
            .unwrap();

        match rx.recv().await.unwrap() {
            AppEvent::Toggle(id) => assert_eq!(id.as_str(), "main"),
            other => panic!("unexpected event {other:?}"),
        }
        match rx.recv().await.unwrap() {
            AppEvent::Status(id, Some(reply)) => {
                assert_eq!(id.as_str(), "main");
                reply.send("'main' (menu#0): collapsed".to_string()).await.unwrap();
            }
            other => panic!("unexpected event {other:?}"),
        }

        let mut lines = BufReader::new(client_read).lines();
        assert_eq!(
            lines.next_line().await.unwrap(),
            Some("'main' (menu#0): collapsed".to_string())
        );
    }

    #[test]
    fn test_only_status_carries_a_reply_channel() {
        let (event, reply) = into_event(Command::Reload);
        assert!(matches!(event, AppEvent::ConfigReload));
        assert!(reply.is_none());

        let (event, reply) = into_event(Command::Status("main".into()));
        assert!(matches!(event, AppEvent::Status(_, Some(_))));
        assert!(reply.is_some());
    }
}
