use crate::gateway::IngestGateway;

#[derive(Clone)]
pub struct AppState {
    pub gateway: IngestGateway,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(gateway: IngestGateway, max_body_bytes: usize) -> Self {
        Self {
            gateway,
            max_body_bytes,
        }
    }
}
