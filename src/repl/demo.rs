use super::render;
use crate::clients::{ChatSession, ClientError};
use crate::lifecycle::ChatSystem;
use std::time::Duration;
use tracing::{info, instrument};

const WAIT: Duration = Duration::from_secs(1);

/// Plays a short conversation against `system` and logs every delivery.
///
/// Alice and Bob meet in the default room, Carol joins late and gets the
/// room's history, Bob moves to `rust`, Alice leaves.
#[instrument(skip_all)]
pub async fn run_demo(system: &ChatSystem) -> Result<(), ClientError> {
    let mut alice = system.session("alice", "");
    let mut bob = system.session("bob", "");
    let mut carol = system.session("carol", "");

    info!("=== alice and bob connect ===");
    alice.connect().await?;
    alice.list_users().await?;
    show(&mut alice).await?;
    bob.connect().await?;
    show(&mut alice).await?; // bob joined

    info!("=== room chat ===");
    alice.post("hello").await?;
    show(&mut bob).await?;
    bob.post("hey alice").await?;
    show(&mut alice).await?;

    info!("=== carol joins and sees the history ===");
    carol.connect().await?;
    show(&mut carol).await?;
    show(&mut carol).await?;
    show(&mut alice).await?; // carol joined
    show(&mut bob).await?;

    info!("=== direct message ===");
    carol.direct("alice", "welcome back?").await?;
    show(&mut alice).await?;

    info!("=== who is online ===");
    carol.list_users().await?;
    show(&mut carol).await?;

    info!("=== bob switches to rust ===");
    bob.switch_room("rust").await?;
    show(&mut alice).await?; // bob left
    show(&mut carol).await?;
    bob.post("anyone here?").await?;

    info!("=== alice leaves ===");
    alice.disconnect().await?;
    show(&mut carol).await?;
    carol.list_users().await?;
    show(&mut carol).await?;

    bob.disconnect().await?;
    carol.disconnect().await?;
    info!("=== demo complete ===");
    Ok(())
}

async fn show(session: &mut ChatSession) -> Result<(), ClientError> {
    let event = session.recv_timeout(WAIT).await?;
    info!(to = %session.user_name(), "{}", render(&event, session.room()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[tokio::test]
    #[traced_test]
    async fn demo_runs_to_completion() {
        let system = ChatSystem::new();
        run_demo(&system).await.unwrap();

        assert!(logs_contain("[DM from carol]: welcome back?"));
        assert!(logs_contain("bob left general"));
        assert!(logs_contain("Online in general: carol"));
        assert!(logs_contain("Online in general: alice"));
        assert!(logs_contain("demo complete"));

        system.shutdown().await.unwrap();
    }
}
