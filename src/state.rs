use std::sync::Arc;

use crate::config::Config;
use crate::relay::RelaySender;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub relay: RelaySender,
    pub config: Config,
}
