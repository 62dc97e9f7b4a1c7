use std::sync::Arc;

use {
    tokio::{
        io::{AsyncBufRead, AsyncBufReadExt, BufReader},
        task::JoinHandle,
    },
    tracing::{info, warn},
};

use crate::{Result, outbound::IrcOutbound};

/// Forward every non-blank line from `input` to the server verbatim.
///
/// Returns the number of lines sent once `input` reaches EOF.
pub async fn forward_lines<R>(input: R, outbound: &IrcOutbound) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut sent = 0;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        outbound.send_raw(&line).await?;
        sent += 1;
    }
    Ok(sent)
}

/// Pass raw commands typed on stdin straight to the server.
pub fn spawn_console(outbound: Arc<IrcOutbound>) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("console passthrough enabled; lines on stdin are sent to the server");
        match forward_lines(BufReader::new(tokio::io::stdin()), &outbound).await {
            Ok(sent) => info!(sent, "console input closed"),
            Err(e) => warn!(error = %e, "console passthrough stopped"),
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use {super::*, tokio::sync::mpsc};

    #[tokio::test]
    async fn forwards_non_blank_lines() {
        let (tx, mut rx) = mpsc::channel(8);
        let outbound = IrcOutbound::new(tx);
        let input: &[u8] = b"JOIN #extra\r\n\n   \nPRIVMSG #extra :hello\n";

        let sent = forward_lines(input, &outbound).await.unwrap();

        assert_eq!(sent, 2);
        assert_eq!(rx.recv().await.unwrap(), "JOIN #extra");
        assert_eq!(rx.recv().await.unwrap(), "PRIVMSG #extra :hello");
    }
}
