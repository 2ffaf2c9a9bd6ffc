use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {resource}: {reason}")]
    Fetch { resource: String, reason: String },

    #[error("{resource} responded with status {status}")]
    Status { resource: String, status: u16 },

    #[error("failed to read {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{resource} has no header row")]
    MissingHeader { resource: String },
}

impl LoadError {
    pub fn fetch(resource: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }

    pub fn resource(&self) -> &str {
        match self {
            Self::Fetch { resource, .. }
            | Self::Status { resource, .. }
            | Self::Io { resource, .. }
            | Self::MissingHeader { resource } => resource,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LoadError;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn io_message_names_the_cause() {
        let error = LoadError::Io {
            resource: "projects.csv".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };

        assert_eq!(error.to_string(), "failed to read projects.csv: no such file");
        assert!(error.source().is_some());
        assert_eq!(error.resource(), "projects.csv");
    }

    #[test]
    fn status_message_carries_code() {
        let error = LoadError::Status {
            resource: "courses.csv".to_string(),
            status: 404,
        };
        assert_eq!(error.to_string(), "courses.csv responded with status 404");
    }
}
