use uuid::Uuid;

/// Per-request context, inserted by the request-logging middleware.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: Uuid,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::now_v7(),
        }
    }

    /// Reuse an id supplied by the caller (`x-request-id`), if it parses.
    pub fn from_header(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse().ok())
            .map(|request_id| Self { request_id })
            .unwrap_or_default()
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
