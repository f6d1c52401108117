//! Ticket schema - A repair ticket and its lifecycle stage

use serde::{Deserialize, Serialize};

/// Repair lifecycle stage of a ticket.
///
/// Serialized as its zero-based index. Indices past either end clamp to the
/// nearest valid stage, so a stored or requested value can never put a
/// ticket outside the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "StoredIndex", into = "usize")]
pub enum Stage {
    /// Vehicle received at the counter
    CheckedIn,
    /// Technician is finding the fault
    Diagnosing,
    /// Quote sent, waiting for the customer to approve
    WaitingApproval,
    /// Work underway
    RepairInProgress,
    /// Final inspection
    QualityCheck,
    /// Customer can collect the vehicle
    ReadyForPickup,
    /// Vehicle handed back, ticket closed
    Completed,
}

impl Stage {
    /// Zero-based position in the stage sequence
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable stage name shown to customers and staff
    pub fn label(self) -> &'static str {
        match self {
            Stage::CheckedIn => "Checked In",
            Stage::Diagnosing => "Diagnosing",
            Stage::WaitingApproval => "Waiting Approval",
            Stage::RepairInProgress => "Repair In Progress",
            Stage::QualityCheck => "Quality Check",
            Stage::ReadyForPickup => "Ready for Pickup",
            Stage::Completed => "Completed",
        }
    }
}

impl From<usize> for Stage {
    fn from(index: usize) -> Self {
        match index {
            0 => Stage::CheckedIn,
            1 => Stage::Diagnosing,
            2 => Stage::WaitingApproval,
            3 => Stage::RepairInProgress,
            4 => Stage::QualityCheck,
            5 => Stage::ReadyForPickup,
            _ => Stage::Completed,
        }
    }
}

/// Raw `stage_index` as read from storage, signed so negative values clamp
#[derive(Deserialize)]
#[serde(transparent)]
struct StoredIndex(i64);

impl From<StoredIndex> for Stage {
    fn from(raw: StoredIndex) -> Self {
        crate::domain::clamp_stage_index(raw.0)
    }
}

impl From<Stage> for usize {
    fn from(stage: Stage) -> Self {
        stage.index()
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A repair ticket belonging to one shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// Unique identifier, fixed at creation
    id: String,

    /// Shop partition key, fixed at creation
    shop_id: String,

    /// Owning customer
    pub client_id: String,

    /// Customer display name
    #[serde(default)]
    pub customer_name: String,

    /// Vehicle description (make, model, plate)
    #[serde(default)]
    pub vehicle: String,

    /// Reported problem
    #[serde(default)]
    pub issue: String,

    /// Current lifecycle stage. Only the transition path writes it.
    #[serde(rename = "stage_index")]
    stage: Stage,

    /// ISO 8601 creation timestamp
    created_at: String,

    /// ISO 8601 last update timestamp
    pub updated_at: String,
}

impl Ticket {
    /// Create a checked-in ticket with empty descriptive fields
    pub fn new(id: String, shop_id: String, client_id: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Ticket {
            schema_version: 1,
            id,
            shop_id,
            client_id,
            customer_name: String::new(),
            vehicle: String::new(),
            issue: String::new(),
            stage: Stage::CheckedIn,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn stage_index(&self) -> usize {
        self.stage.index()
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    /// Return a new Ticket with the given descriptive fields, updating the timestamp
    pub fn with_details(
        mut self,
        customer_name: impl Into<String>,
        vehicle: impl Into<String>,
        issue: impl Into<String>,
    ) -> Self {
        self.customer_name = customer_name.into();
        self.vehicle = vehicle.into();
        self.issue = issue.into();
        self.touch_returning()
    }

    /// Return a new Ticket at the given stage.
    ///
    /// Setting the stage the ticket already has returns it untouched, which
    /// keeps repeated store writes idempotent.
    pub(crate) fn with_stage(mut self, stage: Stage) -> Self {
        if self.stage == stage {
            return self;
        }
        self.stage = stage;
        self.touch_returning()
    }

    fn touch_returning(mut self) -> Self {
        self.updated_at = chrono::Utc::now().to_rfc3339();
        self
    }
}
