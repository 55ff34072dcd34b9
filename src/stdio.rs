//! Line-delimited JSON bridge to the host.
//!
//! Each inbound line is one host message or domain event. Outbound requests
//! are written as one JSON object per line. Logs must not go to the writer.

use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::MissedTickBehavior;

use crate::protocol::Inbound;
use crate::session::Session;

/// Serve `session` until `reader` reaches end of input.
///
/// A rejected line is logged and skipped; it never ends the session.
pub async fn run<R, W>(session: &mut Session, reader: R, mut writer: W, tick: Duration) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !line.trim().is_empty() {
                    if let Err(e) = Inbound::parse(&line).and_then(|inbound| session.handle(inbound)) {
                        tracing::warn!("Rejected message: {}", e);
                    }
                    write_outbound(session, &mut writer).await?;
                }
            }
            _ = ticker.tick() => {
                session.tick();
            }
        }
    }

    session.tick();
    writer.flush().await?;
    Ok(())
}

/// Serve a fresh session over the process's stdin and stdout.
pub async fn run_stdio(tick: Duration) -> Result<()> {
    tracing::info!("Starting feature session via stdio");

    let mut session = Session::default();
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run(&mut session, stdin, tokio::io::stdout(), tick).await?;

    tracing::info!(features = session.tree().len(), "Feature session ended");
    Ok(())
}

async fn write_outbound<W: AsyncWrite + Unpin>(session: &mut Session, writer: &mut W) -> Result<()> {
    for message in session.sink_mut().drain() {
        let mut line = serde_json::to_vec(&message)?;
        line.push(b'\n');
        writer.write_all(&line).await?;
    }
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::OutboundMessage;

    fn parse_output(out: &[u8]) -> Vec<OutboundMessage> {
        std::str::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn writes_outbound_requests_per_line() {
        let input = concat!(
            r#"{"type":"INIT_FEATURES","value":{"features":[]}}"#,
            "\n",
            r#"{"type":"CREATE_FEATURE"}"#,
            "\n",
            r#"{"type":"CHANGE_VISIBLE","id":"1","visible":false}"#,
            "\n",
        );
        let mut session = Session::default();
        let mut out = Vec::new();

        run(&mut session, input.as_bytes(), &mut out, Duration::from_millis(5))
            .await
            .unwrap();

        let messages = parse_output(&out);
        assert_eq!(messages.len(), 3);
        assert!(matches!(messages[0], OutboundMessage::RequestUpdateFeatures { .. }));
        assert_eq!(
            messages[1],
            OutboundMessage::RequestChangeNodeVisible {
                nodes: vec![],
                visible: false
            }
        );
        assert!(matches!(messages[2], OutboundMessage::RequestUpdateFeatures { .. }));
        assert_eq!(session.view().render(), "Features (1)\n○ Feature 1\n");
    }

    #[tokio::test]
    async fn skips_rejected_lines() {
        let input = concat!(
            r#"{"type":"INIT_FEATURES","value":{"features":[]}}"#,
            "\n",
            r#"{"type":"SOMETHING_NEW"}"#,
            "\n",
            "\n",
            r#"{"type":"REQUEST_SYNC"}"#,
            "\n",
        );
        let mut session = Session::default();
        let mut out = Vec::new();

        run(&mut session, input.as_bytes(), &mut out, Duration::from_millis(5))
            .await
            .unwrap();

        assert_eq!(parse_output(&out), vec![OutboundMessage::RequestSyncFeatures]);
    }
}
