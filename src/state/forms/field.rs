//! Beneficial owner field identifiers and input values

use super::errors::ContractError;

/// Type-safe field values coming from the identity inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Toggle(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Get the text value (returns empty string for toggles)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Toggle(_) => "",
        }
    }

    /// Get the toggle value (text counts as set when non-empty)
    pub fn as_toggle(&self) -> bool {
        match self {
            FieldValue::Toggle(b) => *b,
            FieldValue::Text(s) => !s.is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Toggle(value)
    }
}

/// A single input on the identity form of a beneficial owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OwnerField {
    FirstName,
    LastName,
    Street,
    City,
    State,
    ZipCode,
    Dob,
    SsnLast4,
    ManualAddress,
}

impl OwnerField {
    /// Text inputs in display order
    pub const TEXT_FIELDS: [OwnerField; 8] = [
        OwnerField::FirstName,
        OwnerField::LastName,
        OwnerField::Street,
        OwnerField::City,
        OwnerField::State,
        OwnerField::ZipCode,
        OwnerField::Dob,
        OwnerField::SsnLast4,
    ];

    /// Resolve an input key emitted by the identity inputs.
    ///
    /// The shared address input reports `addressStreet`, `addressCity`,
    /// `addressState` and `addressZipCode`; those are stored under the
    /// owner's own keys.
    pub fn from_input_key(key: &str) -> Result<Self, ContractError> {
        let field = match key {
            "firstName" => OwnerField::FirstName,
            "lastName" => OwnerField::LastName,
            "street" | "addressStreet" => OwnerField::Street,
            "city" | "addressCity" => OwnerField::City,
            "state" | "addressState" => OwnerField::State,
            "zipCode" | "addressZipCode" => OwnerField::ZipCode,
            "dob" => OwnerField::Dob,
            "ssnLast4" => OwnerField::SsnLast4,
            "manualAddress" => OwnerField::ManualAddress,
            other => return Err(ContractError::UnknownField(other.to_string())),
        };
        Ok(field)
    }

    /// Key the field is stored and reported under
    pub fn key(&self) -> &'static str {
        match self {
            OwnerField::FirstName => "firstName",
            OwnerField::LastName => "lastName",
            OwnerField::Street => "street",
            OwnerField::City => "city",
            OwnerField::State => "state",
            OwnerField::ZipCode => "zipCode",
            OwnerField::Dob => "dob",
            OwnerField::SsnLast4 => "ssnLast4",
            OwnerField::ManualAddress => "manualAddress",
        }
    }

    /// Key the identity inputs report edits under
    pub fn input_key(&self) -> &'static str {
        match self {
            OwnerField::Street => "addressStreet",
            OwnerField::City => "addressCity",
            OwnerField::State => "addressState",
            OwnerField::ZipCode => "addressZipCode",
            other => other.key(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OwnerField::FirstName => "Legal first name",
            OwnerField::LastName => "Legal last name",
            OwnerField::Street => "Personal address",
            OwnerField::City => "City",
            OwnerField::State => "State",
            OwnerField::ZipCode => "Zip code",
            OwnerField::Dob => "Date of birth (YYYY-MM-DD)",
            OwnerField::SsnLast4 => "Last 4 of SSN",
            OwnerField::ManualAddress => "Enter address manually",
        }
    }

    /// Whether edits to this field are persisted to the draft
    pub fn is_persisted(&self) -> bool {
        !matches!(self, OwnerField::ManualAddress)
    }

    /// Maximum accepted length for typed input, if any
    pub fn max_len(&self) -> Option<usize> {
        match self {
            OwnerField::SsnLast4 => Some(4),
            OwnerField::State => Some(2),
            OwnerField::ZipCode => Some(10),
            OwnerField::Dob => Some(10),
            _ => None,
        }
    }
}
