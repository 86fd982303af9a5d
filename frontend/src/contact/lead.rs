//! Lead data collected by the contact wizard and the record handed to the sink.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::contact::WizardError;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Counted in UTF-16 code units, the way a browser reports string length.
pub const MIN_DESCRIPTION_CHARS: usize = 20;

/// Every field a visitor can edit in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LeadField {
    Name,
    Email,
    Company,
    Role,
    ProjectType,
    Budget,
    Description,
    Competitors,
}

impl LeadField {
    pub const ALL: [LeadField; 8] = [
        LeadField::Name,
        LeadField::Email,
        LeadField::Company,
        LeadField::Role,
        LeadField::ProjectType,
        LeadField::Budget,
        LeadField::Description,
        LeadField::Competitors,
    ];

    /// Name used for the DOM `name` attribute of the matching input.
    pub fn as_str(self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::Email => "email",
            LeadField::Company => "company",
            LeadField::Role => "role",
            LeadField::ProjectType => "project_type",
            LeadField::Budget => "budget",
            LeadField::Description => "description",
            LeadField::Competitors => "competitors",
        }
    }
}

impl FromStr for LeadField {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| WizardError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectType {
    #[serde(rename = "web-app")]
    WebApp,
    #[serde(rename = "website")]
    Website,
    #[serde(rename = "internal-tool")]
    InternalTool,
    #[serde(rename = "other")]
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 4] = [
        ProjectType::WebApp,
        ProjectType::Website,
        ProjectType::InternalTool,
        ProjectType::Other,
    ];

    pub fn value(self) -> &'static str {
        match self {
            ProjectType::WebApp => "web-app",
            ProjectType::Website => "website",
            ProjectType::InternalTool => "internal-tool",
            ProjectType::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectType::WebApp => "Web Application",
            ProjectType::Website => "Marketing Site",
            ProjectType::InternalTool => "Internal Tool",
            ProjectType::Other => "Other",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            ProjectType::WebApp => "SaaS, Dashboard, Complex Logic",
            ProjectType::Website => "Landing Page, Portfolio, Corp Site",
            ProjectType::InternalTool => "Admin Panel, Data Management",
            ProjectType::Other => "Something unique?",
        }
    }

    /// "internal-tool" -> "Internal Tool", as shown on the review step.
    pub fn review_text(self) -> String {
        self.value()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

impl FromStr for ProjectType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectType::ALL.into_iter().find(|p| p.value() == s).ok_or(())
    }
}

/// Budget brackets offered on the scope step, in INR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetRange {
    #[serde(rename = "< 1000/-")]
    UnderOneThousand,
    #[serde(rename = "1000/- to 5000/-")]
    OneToFiveThousand,
    #[serde(rename = "5000/- to 10k/-")]
    FiveToTenThousand,
    #[serde(rename = ">10k/-")]
    OverTenThousand,
}

impl BudgetRange {
    pub const ALL: [BudgetRange; 4] = [
        BudgetRange::UnderOneThousand,
        BudgetRange::OneToFiveThousand,
        BudgetRange::FiveToTenThousand,
        BudgetRange::OverTenThousand,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BudgetRange::UnderOneThousand => "< 1000/-",
            BudgetRange::OneToFiveThousand => "1000/- to 5000/-",
            BudgetRange::FiveToTenThousand => "5000/- to 10k/-",
            BudgetRange::OverTenThousand => ">10k/-",
        }
    }
}

impl FromStr for BudgetRange {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BudgetRange::ALL.into_iter().find(|b| b.label() == s).ok_or(())
    }
}

/// Per-field validation messages for the step being checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<LeadField, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: LeadField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: LeadField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: LeadField, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn clear(&mut self, field: LeadField) {
        self.0.remove(&field);
    }

    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LeadField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

/// The partially filled inquiry while the wizard is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
    pub project_type: Option<ProjectType>,
    pub budget: Option<BudgetRange>,
    pub description: String,
    pub competitors: String,
}

impl LeadForm {
    /// Current value of `field` as it appears in its input.
    pub fn value(&self, field: LeadField) -> &str {
        match field {
            LeadField::Name => &self.name,
            LeadField::Email => &self.email,
            LeadField::Company => &self.company,
            LeadField::Role => &self.role,
            LeadField::Description => &self.description,
            LeadField::Competitors => &self.competitors,
            LeadField::ProjectType => self.project_type.map(ProjectType::value).unwrap_or(""),
            LeadField::Budget => self.budget.map(BudgetRange::label).unwrap_or(""),
        }
    }

    /// Writes `value` into `field`. Choice fields only accept their known values.
    pub fn set(&mut self, field: LeadField, value: &str) -> Result<(), WizardError> {
        match field {
            LeadField::Name => self.name = value.to_string(),
            LeadField::Email => self.email = value.to_string(),
            LeadField::Company => self.company = value.to_string(),
            LeadField::Role => self.role = value.to_string(),
            LeadField::Description => self.description = value.to_string(),
            LeadField::Competitors => self.competitors = value.to_string(),
            LeadField::ProjectType => {
                let parsed = value.parse().map_err(|_| invalid_choice(field, value))?;
                self.project_type = Some(parsed);
            }
            LeadField::Budget => {
                let parsed = value.parse().map_err(|_| invalid_choice(field, value))?;
                self.budget = Some(parsed);
            }
        }
        Ok(())
    }

    /// Step 1: who is asking.
    pub fn validate_identity(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        if self.name.is_empty() {
            errors.insert(LeadField::Name, "Name is required");
        }
        if !is_valid_email(&self.email) {
            errors.insert(LeadField::Email, "Valid email is required");
        }
        errors
    }

    /// Step 2: what kind of project and how much.
    pub fn validate_scope(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        if self.project_type.is_none() {
            errors.insert(LeadField::ProjectType, "Please select a project type");
        }
        if self.budget.is_none() {
            errors.insert(LeadField::Budget, "Please select a budget range");
        }
        errors
    }

    /// Step 3: the project description. Length is raw, nothing is trimmed.
    pub fn validate_vision(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        if self.description.encode_utf16().count() < MIN_DESCRIPTION_CHARS {
            errors.insert(
                LeadField::Description,
                "Please provide a bit more detail (min 20 chars)",
            );
        }
        errors
    }
}

fn invalid_choice(field: LeadField, value: &str) -> WizardError {
    WizardError::InvalidChoice {
        field,
        value: value.to_string(),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
}

/// A completed inquiry, one row of the `projects` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
    pub project_type: ProjectType,
    pub budget: BudgetRange,
    pub description: String,
    pub competitors: String,
    pub status: LeadStatus,
}

impl TryFrom<&LeadForm> for LeadSubmission {
    type Error = FieldErrors;

    fn try_from(form: &LeadForm) -> Result<Self, Self::Error> {
        let mut errors = form.validate_identity();
        errors.merge(form.validate_scope());
        errors.merge(form.validate_vision());

        match (form.project_type, form.budget) {
            (Some(project_type), Some(budget)) if errors.is_empty() => Ok(LeadSubmission {
                name: form.name.clone(),
                email: form.email.clone(),
                company: form.company.clone(),
                role: form.role.clone(),
                project_type,
                budget,
                description: form.description.clone(),
                competitors: form.competitors.clone(),
                status: LeadStatus::New,
            }),
            _ => Err(errors),
        }
    }
}
