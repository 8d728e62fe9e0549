//! Ad categories, conditions, and submission validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::form::{
    clean_text, impl_choice_conversions, parse_choice_field, Choices, FieldErrors,
};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Furniture,
    Books,
    Other,
}

impl Choices for Category {
    const KIND: &'static str = "category";
    const ALL: &'static [Self] = &[
        Self::Electronics,
        Self::Clothing,
        Self::Furniture,
        Self::Books,
        Self::Other,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::Furniture => "furniture",
            Self::Books => "books",
            Self::Other => "other",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Clothing => "Clothing",
            Self::Furniture => "Furniture",
            Self::Books => "Books",
            Self::Other => "Other",
        }
    }
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Used,
}

impl Choices for Condition {
    const KIND: &'static str = "condition";
    const ALL: &'static [Self] = &[Self::New, Self::Used];

    fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Used => "used",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Used => "Used",
        }
    }
}

impl_choice_conversions!(Category);
impl_choice_conversions!(Condition);

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Raw ad submission as received from a client (create and edit share it).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AdForm {
    #[validate(
        required(message = "This field is required."),
        length(
            max = 200,
            message = "Ensure this value has at most 200 characters."
        )
    )]
    pub title: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub description: Option<String>,
    #[validate(
        url(message = "Enter a valid URL."),
        length(
            max = 200,
            message = "Ensure this value has at most 200 characters."
        )
    )]
    pub image_url: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub category: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub condition: Option<String>,
}

impl AdForm {
    /// Trim every field and drop blank ones so `required` sees them as missing.
    fn cleaned(&self) -> Self {
        Self {
            title: clean_text(self.title.as_deref()),
            description: clean_text(self.description.as_deref()),
            image_url: clean_text(self.image_url.as_deref()),
            category: clean_text(self.category.as_deref()),
            condition: clean_text(self.condition.as_deref()),
        }
    }
}

/// A validated ad, ready to be inserted or applied as an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdDraft {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category: Category,
    pub condition: Condition,
}

/// Validate a raw ad submission.
///
/// Returns every field error at once rather than stopping at the first.
pub fn validate_ad_form(form: &AdForm) -> Result<AdDraft, FieldErrors> {
    let form = form.cleaned();
    let mut errors = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => FieldErrors::from(e),
    };

    let category =
        parse_choice_field::<Category>(&mut errors, "category", form.category.as_deref());
    let condition =
        parse_choice_field::<Condition>(&mut errors, "condition", form.condition.as_deref());

    match (form.title, form.description, category, condition) {
        (Some(title), Some(description), Some(category), Some(condition)) if errors.is_empty() => {
            Ok(AdDraft {
                title,
                description,
                image_url: form.image_url,
                category,
                condition,
            })
        }
        _ => Err(errors),
    }
}
