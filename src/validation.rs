//! Field validation for employee and project input.
//!
//! Every rule runs and every failing field is reported, so callers get the
//! whole picture in one response. Only the first violation per field is kept.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{CreateEmployeeInput, CreateProjectInput, NewEmployee, NewProject};

static NIF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{8}[A-HJ-NP-TV-Z]$").expect("valid nif regex"));
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÁÉÍÓÚÜÑáéíóúüñ ]+$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 40;
pub const DESCRIPTION_MAX_CHARS: usize = 125;
pub const LOCATION_MAX_CHARS: usize = 30;
pub const OBSERVATIONS_MAX_CHARS: usize = 300;

/// Field name → message for every field that failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation unless the field already has one.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Merges `other` with every field prefixed, e.g. `employees[2].email`.
    pub fn merge_prefixed(&mut self, prefix: &str, other: ValidationErrors) {
        for (field, message) in other.0 {
            self.add(format!("{prefix}.{field}"), message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Request input that can be checked against the field rules.
///
/// A successful check yields the record to store. `today` anchors the
/// past/present date checks and fills in defaulted dates.
pub trait Validate {
    type Valid;

    fn validate(&self, today: NaiveDate) -> Result<Self::Valid, ValidationErrors>;
}

impl Validate for CreateEmployeeInput {
    type Valid = NewEmployee;

    fn validate(&self, today: NaiveDate) -> Result<NewEmployee, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(nif) = &self.nif {
            if !NIF_RE.is_match(nif) {
                errors.add(
                    "nif",
                    "The NIF must be 8 digits followed by a valid control letter.",
                );
            }
        }

        check_name(&mut errors, "first_name", &self.first_name);
        check_name(&mut errors, "last_name1", &self.last_name1);
        check_name(&mut errors, "last_name2", &self.last_name2);

        if let Some(birth_date) = self.birth_date {
            if birth_date >= today {
                errors.add("birth_date", "The birth date must be in the past.");
            }
        }

        check_phone(&mut errors, "phone1", &self.phone1);
        check_phone(&mut errors, "phone2", &self.phone2);

        if is_blank(&self.email) {
            errors.add("email", "The email must not be blank.");
        } else if !EMAIL_RE.is_match(&self.email) {
            errors.add("email", "The email is not valid.");
        }

        let start_date = self.start_date.unwrap_or(today);
        if start_date > today {
            errors.add("start_date", "The start date cannot be in the future.");
        }

        let civil_status = match self.civil_status {
            Some(code) if code.is_ascii_uppercase() => Some(code),
            Some(_) => {
                errors.add(
                    "civil_status",
                    "The civil status must be a single uppercase letter.",
                );
                None
            }
            None => {
                errors.add("civil_status", "The civil status is required.");
                None
            }
        };

        match civil_status {
            Some(civil_status) if errors.is_empty() => Ok(NewEmployee {
                nif: self.nif.clone(),
                first_name: self.first_name.clone(),
                last_name1: self.last_name1.clone(),
                last_name2: self.last_name2.clone(),
                birth_date: self.birth_date,
                phone1: self.phone1.clone(),
                phone2: self.phone2.clone(),
                email: self.email.clone(),
                start_date,
                civil_status,
                university_education: self.university_education,
            }),
            _ => Err(errors),
        }
    }
}

impl Validate for CreateProjectInput {
    type Valid = NewProject;

    fn validate(&self, today: NaiveDate) -> Result<NewProject, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if is_blank(&self.description) {
            errors.add("description", "The description must not be blank.");
        } else if char_len(&self.description) > DESCRIPTION_MAX_CHARS {
            errors.add(
                "description",
                format!("The description cannot exceed {DESCRIPTION_MAX_CHARS} characters."),
            );
        }

        let start_date = match self.start_date {
            Some(date) if date > today => {
                errors.add("start_date", "The start date cannot be in the future.");
                None
            }
            Some(date) => Some(date),
            None => {
                errors.add("start_date", "The start date is required.");
                None
            }
        };

        if let Some(end_date) = self.end_date {
            if end_date > today {
                errors.add("end_date", "The end date cannot be in the future.");
            }
        }

        if let Some(location) = &self.location {
            if char_len(location) > LOCATION_MAX_CHARS {
                errors.add(
                    "location",
                    format!("The location cannot exceed {LOCATION_MAX_CHARS} characters."),
                );
            }
        }

        if let Some(observations) = &self.observations {
            if char_len(observations) > OBSERVATIONS_MAX_CHARS {
                errors.add(
                    "observations",
                    format!("The observations cannot exceed {OBSERVATIONS_MAX_CHARS} characters."),
                );
            }
        }

        match start_date {
            Some(start_date) if errors.is_empty() => Ok(NewProject {
                description: self.description.clone(),
                start_date,
                end_date: self.end_date,
                location: self.location.clone(),
                observations: self.observations.clone(),
            }),
            _ => Err(errors),
        }
    }
}

fn check_name(errors: &mut ValidationErrors, field: &str, value: &str) {
    if is_blank(value) {
        errors.add(field, "This field must not be blank.");
    } else if !NAME_RE.is_match(value) {
        errors.add(field, "Only letters and spaces are allowed.");
    } else {
        let len = char_len(value);
        if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
            errors.add(
                field,
                format!("Must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters."),
            );
        }
    }
}

fn check_phone(errors: &mut ValidationErrors, field: &str, value: &str) {
    if is_blank(value) {
        errors.add(field, "The phone number must not be blank.");
    } else if !PHONE_RE.is_match(value) {
        errors.add(field, "The phone number must contain between 7 and 15 digits.");
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn valid_employee() -> CreateEmployeeInput {
        CreateEmployeeInput {
            nif: Some("12345678Z".to_string()),
            first_name: "María José".to_string(),
            last_name1: "Núñez".to_string(),
            last_name2: "García".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 31),
            phone1: "+34600111222".to_string(),
            phone2: "911222333".to_string(),
            email: "maria@example.com".to_string(),
            start_date: None,
            civil_status: Some('S'),
            university_education: true,
        }
    }

    fn valid_project() -> CreateProjectInput {
        CreateProjectInput {
            description: "Alpha".to_string(),
            start_date: Some(today()),
            end_date: None,
            location: Some("Madrid".to_string()),
            observations: None,
        }
    }

    #[test]
    fn accepts_valid_employee() {
        assert!(valid_employee().validate(today()).is_ok());
    }

    #[test]
    fn nif_requires_eight_digits_and_allowed_letter() {
        for nif in ["1234567Z", "123456789", "12345678I", "12345678O", "12345678U", "12345678z"] {
            let mut input = valid_employee();
            input.nif = Some(nif.to_string());
            let errors = input.validate(today()).unwrap_err();
            assert!(errors.get("nif").is_some(), "{nif} should be rejected");
        }

        let mut input = valid_employee();
        input.nif = None;
        assert!(input.validate(today()).is_ok());
    }

    #[test]
    fn names_reject_digits_and_bad_lengths() {
        let mut input = valid_employee();
        input.first_name = "Al".to_string();
        input.last_name1 = "Smith2".to_string();
        input.last_name2 = "   ".to_string();

        let errors = input.validate(today()).unwrap_err();
        assert_eq!(
            errors.get("first_name"),
            Some("Must be between 3 and 40 characters.")
        );
        assert_eq!(
            errors.get("last_name1"),
            Some("Only letters and spaces are allowed.")
        );
        assert_eq!(
            errors.get("last_name2"),
            Some("This field must not be blank.")
        );
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let mut input = valid_employee();
        input.first_name = "Ñ".repeat(40);
        assert!(input.validate(today()).is_ok());

        input.first_name = "Ñ".repeat(41);
        assert!(input.validate(today()).is_err());
    }

    #[test]
    fn phone_allows_optional_plus() {
        let mut input = valid_employee();
        input.phone1 = "1234567".to_string();
        input.phone2 = "+123456789012345".to_string();
        assert!(input.validate(today()).is_ok());

        input.phone1 = "123456".to_string();
        input.phone2 = "++1234567".to_string();
        let errors = input.validate(today()).unwrap_err();
        assert!(errors.get("phone1").is_some());
        assert!(errors.get("phone2").is_some());
    }

    #[test]
    fn email_must_have_domain() {
        let mut input = valid_employee();
        input.email = "maria@example".to_string();
        let errors = input.validate(today()).unwrap_err();
        assert_eq!(errors.get("email"), Some("The email is not valid."));
    }

    #[test]
    fn birth_date_must_be_strictly_past() {
        let mut input = valid_employee();
        input.birth_date = Some(today());
        let errors = input.validate(today()).unwrap_err();
        assert!(errors.get("birth_date").is_some());
    }

    #[test]
    fn start_date_may_be_today_but_not_future() {
        let mut input = valid_employee();
        input.start_date = Some(today());
        assert!(input.validate(today()).is_ok());

        input.start_date = today().succ_opt();
        let errors = input.validate(today()).unwrap_err();
        assert!(errors.get("start_date").is_some());
    }

    #[test]
    fn reports_every_invalid_field_at_once() {
        let mut input = valid_employee();
        input.nif = Some("bad".to_string());
        input.email = String::new();
        input.phone1 = "abc".to_string();
        input.civil_status = Some('s');

        let errors = input.validate(today()).unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["civil_status", "email", "nif", "phone1"]);
    }

    #[test]
    fn accepts_valid_project() {
        assert!(valid_project().validate(today()).is_ok());
    }

    #[test]
    fn project_limits_are_enforced() {
        let mut input = valid_project();
        input.description = "x".repeat(126);
        input.location = Some("y".repeat(31));
        input.observations = Some("z".repeat(301));
        input.start_date = today().succ_opt();
        input.end_date = today().succ_opt();

        let errors = input.validate(today()).unwrap_err();
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn project_description_must_not_be_blank() {
        let mut input = valid_project();
        input.description = " ".to_string();
        let errors = input.validate(today()).unwrap_err();
        assert_eq!(
            errors.get("description"),
            Some("The description must not be blank.")
        );
    }

    #[test]
    fn employee_start_date_defaults_to_today() {
        let employee = valid_employee().validate(today()).unwrap();
        assert_eq!(employee.start_date, today());
        assert_eq!(employee.civil_status, 'S');
    }

    #[test]
    fn empty_employee_reports_every_required_field() {
        let errors = CreateEmployeeInput::default().validate(today()).unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(
            fields,
            vec![
                "civil_status",
                "email",
                "first_name",
                "last_name1",
                "last_name2",
                "phone1",
                "phone2"
            ]
        );
        assert_eq!(
            errors.get("civil_status"),
            Some("The civil status is required.")
        );
    }

    #[test]
    fn project_requires_description_and_start_date() {
        let errors = CreateProjectInput::default().validate(today()).unwrap_err();
        assert_eq!(
            errors.get("description"),
            Some("The description must not be blank.")
        );
        assert_eq!(errors.get("start_date"), Some("The start date is required."));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn merge_prefixed_namespaces_fields() {
        let mut inner = ValidationErrors::new();
        inner.add("email", "bad");
        let mut outer = ValidationErrors::new();
        outer.merge_prefixed("employees[1]", inner);
        assert_eq!(outer.get("employees[1].email"), Some("bad"));
    }
}
