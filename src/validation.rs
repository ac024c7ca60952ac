//! Field validation for identities and the contract form
//!
//! Everything here is pure: the same input always yields the same errors,
//! so validation can run as often as the caller likes.

use crate::state::{
    BeneficialOwner, Checkbox, ContractForm, ErrorMap, FormErrors, OwnerField, DOB_AGE_KEY,
};
use chrono::{Local, Months, NaiveDate};

const DATE_FORMAT: &str = "%Y-%m-%d";
const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 150;
const DATE_WINDOW_MONTHS: u32 = 1000 * 12;

/// Values that can satisfy a "required" check
pub trait RequiredValue {
    fn is_fulfilled(&self) -> bool;
}

impl RequiredValue for str {
    fn is_fulfilled(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl RequiredValue for String {
    fn is_fulfilled(&self) -> bool {
        self.as_str().is_fulfilled()
    }
}

impl RequiredValue for bool {
    fn is_fulfilled(&self) -> bool {
        *self
    }
}

impl<T: RequiredValue> RequiredValue for Option<T> {
    fn is_fulfilled(&self) -> bool {
        self.as_ref().is_some_and(RequiredValue::is_fulfilled)
    }
}

pub fn is_required_fulfilled<V: RequiredValue + ?Sized>(value: &V) -> bool {
    value.is_fulfilled()
}

/// Validate an identity against today's date
pub fn validate_identity(owner: &BeneficialOwner) -> ErrorMap {
    validate_identity_on(owner, Local::now().date_naive())
}

/// Validate an identity as of `today`. An empty map means valid.
pub fn validate_identity_on(owner: &BeneficialOwner, today: NaiveDate) -> ErrorMap {
    let mut errors = ErrorMap::new();
    let mut flag = |key: &str| {
        errors.insert(key.to_string(), true);
    };

    for field in OwnerField::TEXT_FIELDS {
        if !is_required_fulfilled(owner.text(field)) {
            flag(field.key());
        }
    }

    if !is_valid_address(&owner.street) {
        flag(OwnerField::Street.key());
    }
    if !is_valid_zip_code(&owner.zip_code) {
        flag(OwnerField::ZipCode.key());
    }

    // Date of birth reports format and minimum age under separate keys
    match parse_date(&owner.dob, today) {
        None => flag(OwnerField::Dob.key()),
        Some(dob) if !meets_age_requirements(dob, today) => flag(DOB_AGE_KEY),
        Some(_) => {}
    }

    if !is_valid_ssn_last_four(&owner.ssn_last4) {
        flag(OwnerField::SsnLast4.key());
    }

    errors
}

/// Compute every error for the form as of `today`
pub fn validate_form(form: &ContractForm, today: NaiveDate) -> FormErrors {
    let beneficial_owners_errors = if form.has_other_beneficial_owners {
        form.beneficial_owners
            .iter()
            .map(|owner| validate_identity_on(owner, today))
            .collect()
    } else {
        Vec::new()
    };

    let fields = Checkbox::REQUIRED
        .iter()
        .filter(|checkbox| !is_required_fulfilled(&form.checkbox(**checkbox)))
        .map(|checkbox| (checkbox.key().to_string(), true))
        .collect();

    FormErrors {
        fields,
        beneficial_owners_errors,
    }
}

/// A street must contain a letter and must not be a PO box
pub fn is_valid_address(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_alphabetic()) && !is_po_box(value)
}

fn is_po_box(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '.' | '#'))
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let prefixes = ["pobox", "p0box", "postofficebox", "postbox"];
    if prefixes.iter().any(|p| compact.contains(p)) {
        return true;
    }
    // "Box 123" on its own
    compact
        .strip_prefix("box")
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
}

/// `12345`, `12345-1234` or `12345 1234`
pub fn is_valid_zip_code(value: &str) -> bool {
    let bytes = value.as_bytes();
    let digits = |s: &[u8]| s.iter().all(u8::is_ascii_digit);
    match bytes.len() {
        5 => digits(bytes),
        10 => digits(&bytes[..5]) && matches!(bytes[5], b'-' | b' ') && digits(&bytes[6..]),
        _ => false,
    }
}

/// Parse `YYYY-MM-DD` and require it within a thousand years of `today`
pub fn parse_date(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()?;
    let window = Months::new(DATE_WINDOW_MONTHS);
    let earliest = today.checked_sub_months(window)?;
    let latest = today.checked_add_months(window)?;
    (earliest..=latest).contains(&date).then_some(date)
}

pub fn meets_age_requirements(dob: NaiveDate, today: NaiveDate) -> bool {
    today
        .years_since(dob)
        .is_some_and(|age| (MIN_AGE..=MAX_AGE).contains(&age))
}

/// Four digits, not all zero
pub fn is_valid_ssn_last_four(value: &str) -> bool {
    value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) && value != "0000"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OwnerList;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn valid_owner() -> BeneficialOwner {
        let mut owner = BeneficialOwner::new();
        owner.set(OwnerField::FirstName, "Grace".into());
        owner.set(OwnerField::LastName, "Hopper".into());
        owner.set(OwnerField::Street, "123 Main Street".into());
        owner.set(OwnerField::City, "Arlington".into());
        owner.set(OwnerField::State, "VA".into());
        owner.set(OwnerField::ZipCode, "22201".into());
        owner.set(OwnerField::Dob, "1980-12-09".into());
        owner.set(OwnerField::SsnLast4, "1234".into());
        owner
    }

    fn keys(errors: &ErrorMap) -> Vec<&str> {
        errors.keys().map(String::as_str).collect()
    }

    mod required {
        use super::*;

        #[test]
        fn test_strings() {
            assert!(is_required_fulfilled("x"));
            assert!(!is_required_fulfilled(""));
            assert!(!is_required_fulfilled("   "));
            assert!(is_required_fulfilled(&"y".to_string()));
        }

        #[test]
        fn test_bools_and_options() {
            assert!(is_required_fulfilled(&true));
            assert!(!is_required_fulfilled(&false));
            assert!(!is_required_fulfilled(&None::<bool>));
            assert!(is_required_fulfilled(&Some(true)));
            assert!(!is_required_fulfilled(&Some(String::new())));
        }
    }

    mod identity {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_identity_has_no_errors() {
            assert!(validate_identity_on(&valid_owner(), today()).is_empty());
        }

        #[test]
        fn test_empty_identity_flags_every_field() {
            let errors = validate_identity_on(&BeneficialOwner::new(), today());
            assert_eq!(
                keys(&errors),
                vec!["city", "dob", "firstName", "lastName", "ssnLast4", "state", "street", "zipCode"]
            );
        }

        #[test]
        fn test_po_box_street_is_rejected() {
            let mut owner = valid_owner();
            owner.set(OwnerField::Street, "P.O. Box 42".into());
            assert_eq!(keys(&validate_identity_on(&owner, today())), vec!["street"]);
        }

        #[test]
        fn test_bad_zip() {
            let mut owner = valid_owner();
            owner.set(OwnerField::ZipCode, "1234".into());
            assert_eq!(keys(&validate_identity_on(&owner, today())), vec!["zipCode"]);
        }

        #[test]
        fn test_unparseable_dob_reports_dob() {
            let mut owner = valid_owner();
            owner.set(OwnerField::Dob, "12/09/1980".into());
            assert_eq!(keys(&validate_identity_on(&owner, today())), vec!["dob"]);
        }

        #[test]
        fn test_minor_reports_dob_age() {
            let mut owner = valid_owner();
            owner.set(OwnerField::Dob, "2010-01-01".into());
            assert_eq!(keys(&validate_identity_on(&owner, today())), vec![DOB_AGE_KEY]);
        }

        #[test]
        fn test_future_dob_reports_dob_age() {
            let mut owner = valid_owner();
            owner.set(OwnerField::Dob, "2030-01-01".into());
            assert_eq!(keys(&validate_identity_on(&owner, today())), vec![DOB_AGE_KEY]);
        }

        #[test]
        fn test_bad_ssn() {
            let mut owner = valid_owner();
            owner.set(OwnerField::SsnLast4, "0000".into());
            assert_eq!(keys(&validate_identity_on(&owner, today())), vec!["ssnLast4"]);
        }

        #[test]
        fn test_manual_address_does_not_matter() {
            let mut owner = valid_owner();
            owner.set(OwnerField::ManualAddress, true.into());
            assert!(validate_identity_on(&owner, today()).is_empty());
        }
    }

    mod rules {
        use super::*;

        #[test]
        fn test_zip_formats() {
            assert!(is_valid_zip_code("12345"));
            assert!(is_valid_zip_code("12345-6789"));
            assert!(is_valid_zip_code("12345 6789"));
            assert!(!is_valid_zip_code("12345_6789"));
            assert!(!is_valid_zip_code("abcde"));
            assert!(!is_valid_zip_code(""));
        }

        #[test]
        fn test_addresses() {
            assert!(is_valid_address("1 Infinite Loop"));
            assert!(!is_valid_address("12345"));
            assert!(!is_valid_address("PO Box 12"));
            assert!(!is_valid_address("post office box 7"));
            assert!(!is_valid_address("Box 9"));
            assert!(is_valid_address("10 Boxwood Lane"));
        }

        #[test]
        fn test_age_boundaries() {
            let eighteenth = NaiveDate::from_ymd_opt(2006, 6, 15).unwrap();
            let day_short = NaiveDate::from_ymd_opt(2006, 6, 16).unwrap();
            assert!(meets_age_requirements(eighteenth, today()));
            assert!(!meets_age_requirements(day_short, today()));
            let ancient = NaiveDate::from_ymd_opt(1800, 1, 1).unwrap();
            assert!(!meets_age_requirements(ancient, today()));
        }

        #[test]
        fn test_date_window() {
            assert!(parse_date("1990-02-28", today()).is_some());
            assert!(parse_date("0999-01-01", today()).is_none());
            assert!(parse_date("1990-02-30", today()).is_none());
        }

        #[test]
        fn test_ssn() {
            assert!(is_valid_ssn_last_four("0001"));
            assert!(!is_valid_ssn_last_four("123"));
            assert!(!is_valid_ssn_last_four("12a4"));
        }
    }

    mod form {
        use super::*;
        use pretty_assertions::assert_eq;

        fn agreed() -> ContractForm {
            ContractForm {
                accept_terms_and_conditions: true,
                certify_true_information: true,
                ..Default::default()
            }
        }

        #[test]
        fn test_missing_agreements() {
            let errors = validate_form(&ContractForm::default(), today());
            assert_eq!(
                keys(&errors.fields),
                vec!["acceptTermsAndConditions", "certifyTrueInformation"]
            );
            assert!(errors.beneficial_owners_errors.is_empty());
            assert!(!errors.is_valid());
        }

        #[test]
        fn test_owners_ignored_without_flag() {
            let form = ContractForm {
                beneficial_owners: OwnerList::from(vec![BeneficialOwner::new()]),
                ..agreed()
            };
            let errors = validate_form(&form, today());
            assert!(errors.beneficial_owners_errors.is_empty());
            assert!(errors.is_valid());
        }

        #[test]
        fn test_owner_errors_align_by_index() {
            let form = ContractForm {
                has_other_beneficial_owners: true,
                beneficial_owners: OwnerList::from(vec![valid_owner(), BeneficialOwner::new()]),
                ..agreed()
            };
            let errors = validate_form(&form, today());
            assert_eq!(errors.beneficial_owners_errors.len(), 2);
            assert!(errors.beneficial_owners_errors[0].is_empty());
            assert!(!errors.beneficial_owners_errors[1].is_empty());
            assert!(!errors.is_valid());
        }

        #[test]
        fn test_valid_form() {
            let form = ContractForm {
                has_other_beneficial_owners: true,
                beneficial_owners: OwnerList::from(vec![valid_owner()]),
                ..agreed()
            };
            let errors = validate_form(&form, today());
            assert!(errors.is_valid());
            assert_eq!(errors, validate_form(&form, today()));
        }
    }
}
