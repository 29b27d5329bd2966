use lazy_regex::regex_is_match;
use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

// ###################################
// ->   STRUCTS
// ###################################
/// Deserializable registration
/// A registration as submitted by the caller; both fields are optional so
/// that absence is reported by our own validation rather than a
/// deserialization rejection.
#[derive(Deserialize, Debug)]
pub struct DeserRegistration {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Validated registration
/// A registration with all the fields validated and normalized.
#[derive(Debug)]
pub struct ValidRegistration {
    pub name: RegistrantName,
    pub email: RegistrantEmail,
}

/// Validated, normalized (trimmed + lowercased) email.
/// Normalization happens before validation, so deduplication downstream is
/// case- and whitespace-insensitive.
#[derive(Debug)]
pub struct RegistrantEmail(String);

/// Validated, trimmed registrant name.
#[derive(Debug)]
pub struct RegistrantName(String);

// ###################################
// ->   IMPLS
// ###################################
impl TryFrom<DeserRegistration> for ValidRegistration {
    type Error = DataParsingError;

    fn try_from(deser_reg: DeserRegistration) -> Result<Self, Self::Error> {
        let name = deser_reg.name.ok_or(DataParsingError::FieldMissing)?;
        let email = deser_reg.email.ok_or(DataParsingError::FieldMissing)?;

        Ok(ValidRegistration {
            name: RegistrantName::parse(name)?,
            email: RegistrantEmail::parse(email)?,
        })
    }
}

impl AsRef<str> for RegistrantEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl RegistrantEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim().to_lowercase();

        if value.is_empty() {
            return Err(DataParsingError::FieldMissing);
        }

        if value.graphemes(true).count() > 256 {
            return Err(DataParsingError::EmailTooLong);
        }

        if regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", &value) {
            Ok(RegistrantEmail(value))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }
}

impl AsRef<str> for RegistrantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl RegistrantName {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim();

        if value.is_empty() {
            return Err(DataParsingError::FieldMissing);
        }

        if value.graphemes(true).count() > 256 {
            return Err(DataParsingError::NameTooLong);
        }

        Ok(RegistrantName(value.to_owned()))
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug)]
pub enum DataParsingError {
    FieldMissing,
    NameTooLong,

    EmailInvalid,
    EmailTooLong,
}
// Error Boilerplate
impl core::fmt::Display for DataParsingError {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for DataParsingError {}
