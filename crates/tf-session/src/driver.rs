//! Runs navigators until the player leaves or the presentation closes.

use std::sync::Arc;

use tf_core::{FaultReporter, LogicEnd};

use crate::error::SessionResult;
use crate::navigator::{Exit, Navigator};
use crate::state::SessionState;

/// Run a session to completion.
///
/// A wipe rebuilds the state from the (now empty) data directory and starts a
/// fresh navigator on the same channel.
pub fn run_session(
    mut state: SessionState,
    mut channel: LogicEnd,
    faults: Arc<dyn FaultReporter>,
) -> SessionResult<Exit> {
    loop {
        let mut navigator = Navigator::new(state, channel, Arc::clone(&faults));
        let exit = navigator.run()?;
        if exit != Exit::Reset {
            tracing::info!(?exit, "session ended");
            return Ok(exit);
        }

        let (old_state, old_channel) = navigator.into_parts();
        state = SessionState::load(old_state.data)?;
        channel = old_channel;
        tracing::info!("session reset");
    }
}
