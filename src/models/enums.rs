use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned by `FromStr` on the closed enums below.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} value: {value}")]
pub struct ParseEnumError {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(DocumentKind {
    I20 => "i20",
    Ead => "ead",
    Passport => "passport",
    Visa => "visa",
    I94 => "i94",
    I797 => "i797",
    Other => "other",
});

str_enum!(DocumentState {
    Active => "active",
    ExpiringSoon => "expiring_soon",
    Expired => "expired",
    Superseded => "superseded",
});

str_enum!(EventType {
    Added => "added",
    ExpirationWarning => "expiration_warning",
    Expired => "expired",
    Superseded => "superseded",
});

str_enum!(FieldName {
    FullName => "full_name",
    DocumentNumber => "document_number",
    IssuedDate => "issued_date",
    ExpirationDate => "expiration_date",
    CountryOfIssuance => "country_of_issuance",
    SevisId => "sevis_id",
    SchoolName => "school_name",
    DegreeLevel => "degree_level",
    MajorField => "major_field",
    ProgramEndDate => "program_end_date",
    EadCategory => "ead_category",
    ValidFrom => "valid_from",
    ValidUntil => "valid_until",
    PassportNumber => "passport_number",
    Nationality => "nationality",
    DateOfBirth => "date_of_birth",
    PlaceOfBirth => "place_of_birth",
    VisaType => "visa_type",
    VisaNumber => "visa_number",
    EntriesAllowed => "entries_allowed",
    AdmissionNumber => "admission_number",
    ClassOfAdmission => "class_of_admission",
    AdmitUntilDate => "admit_until_date",
    ReceiptNumber => "receipt_number",
    CaseType => "case_type",
    PetitionerName => "petitioner_name",
    BeneficiaryName => "beneficiary_name",
});

impl DocumentKind {
    /// Human-facing name, as printed on the document.
    pub fn label(&self) -> &'static str {
        match self {
            Self::I20 => "I-20",
            Self::Ead => "EAD",
            Self::Passport => "Passport",
            Self::Visa => "Visa",
            Self::I94 => "I-94",
            Self::I797 => "I-797",
            Self::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::I20 => "doc.text.fill",
            Self::Ead => "person.text.rectangle.fill",
            Self::Passport => "book.closed.fill",
            Self::Visa => "airplane",
            Self::I94 => "doc.fill",
            Self::I797 => "envelope.fill",
            Self::Other => "doc",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::I20 => "blue",
            Self::Ead => "green",
            Self::Passport => "red",
            Self::Visa => "purple",
            Self::I94 => "orange",
            Self::I797 => "indigo",
            Self::Other => "gray",
        }
    }
}

impl DocumentState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Expired => "Expired",
            Self::Superseded => "Superseded",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Active => "green",
            Self::ExpiringSoon => "orange",
            Self::Expired => "red",
            Self::Superseded => "gray",
        }
    }

    /// Active or ExpiringSoon: the document still confers what it grants.
    pub fn is_in_force(&self) -> bool {
        matches!(self, Self::Active | Self::ExpiringSoon)
    }
}

impl EventType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Added => "Document Added",
            Self::ExpirationWarning => "Expiration Warning",
            Self::Expired => "Document Expired",
            Self::Superseded => "Document Superseded",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Added => "plus.circle.fill",
            Self::ExpirationWarning => "clock.fill",
            Self::Expired => "exclamationmark.triangle.fill",
            Self::Superseded => "arrow.turn.up.right",
        }
    }
}

impl FieldName {
    /// Whether the field holds a date rather than text.
    pub fn is_date(&self) -> bool {
        matches!(
            self,
            Self::IssuedDate
                | Self::ExpirationDate
                | Self::ProgramEndDate
                | Self::ValidFrom
                | Self::ValidUntil
                | Self::DateOfBirth
                | Self::AdmitUntilDate
        )
    }
}
