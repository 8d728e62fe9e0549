//! Exchange proposal statuses and the proposal forms.
//!
//! Status is a flat set: an update may move a proposal from any status to
//! any other, including back to `pending`.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::form::{clean_text, impl_choice_conversions, Choices, FieldErrors, REQUIRED_MESSAGE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl Choices for ProposalStatus {
    const KIND: &'static str = "status";
    const ALL: &'static [Self] = &[Self::Pending, Self::Accepted, Self::Rejected];

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }
}

impl_choice_conversions!(ProposalStatus);

/// Body of a proposal submission. The two ads come from the path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProposalForm {
    #[validate(required(message = "This field is required."))]
    pub comment: Option<String>,
}

/// Validate a proposal submission, returning the cleaned comment.
pub fn validate_proposal_form(form: &ProposalForm) -> Result<String, FieldErrors> {
    let cleaned = ProposalForm {
        comment: clean_text(form.comment.as_deref()),
    };
    cleaned.validate().map_err(FieldErrors::from)?;
    cleaned.comment.ok_or_else(|| {
        let mut errors = FieldErrors::new();
        errors.add("comment", REQUIRED_MESSAGE);
        errors
    })
}

/// Body of a status update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusForm {
    pub status: Option<String>,
}

/// Resolve the status an update request asks for.
///
/// Returns `None` when the requested value is missing or not one of the
/// enumerated statuses; the caller leaves the stored status untouched and
/// still reports success.
pub fn requested_status(form: &StatusForm) -> Option<ProposalStatus> {
    form.status.as_deref()?.parse().ok()
}
