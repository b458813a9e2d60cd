use serde::{Deserialize, Serialize};

/// Task priority, transmitted as its Spanish protocol label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Media")]
    Medium,
    #[serde(rename = "Baja")]
    Low,
}

impl Priority {
    /// Parse from the protocol label ("Alta", "Media", "Baja")
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Alta" => Some(Self::High),
            "Media" => Some(Self::Medium),
            "Baja" => Some(Self::Low),
            _ => None,
        }
    }

    /// The protocol label, as it travels over the wire
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "Alta",
            Self::Medium => "Media",
            Self::Low => "Baja",
        }
    }

    pub fn all() -> &'static [Priority] {
        &[Priority::Low, Priority::Medium, Priority::High]
    }

    /// Next priority in form order, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::Medium => Self::Low,
            Self::High => Self::Medium,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Workflow status shared by tasks and subtasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "en progreso")]
    InProgress,
    #[serde(rename = "completada")]
    Completed,
}

impl Status {
    /// Parse from the protocol label ("pendiente", "en progreso", "completada")
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "pendiente" => Some(Self::Pending),
            "en progreso" => Some(Self::InProgress),
            "completada" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::InProgress => "en progreso",
            Self::Completed => "completada",
        }
    }

    pub fn all() -> &'static [Status] {
        &[Status::Pending, Status::InProgress, Status::Completed]
    }

    /// Next status in workflow order, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Self::Pending => Self::InProgress,
            Self::InProgress => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::InProgress => Self::Pending,
            Self::Completed => Self::InProgress,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Pending
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    EditingTask,
    PickingSuggestions,
    ConfirmDelete,
}
