use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::FieldName;

/// A single extracted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Generates the flat record plus name-indexed accessors, so every field is
/// reachable both as a struct member and through `FieldName`.
macro_rules! field_record {
    (
        text { $($tfield:ident => $tname:ident),+ $(,)? }
        date { $($dfield:ident => $dname:ident),+ $(,)? }
    ) => {
        /// Fields extracted from one document. A superset schema: which members
        /// are meaningful depends on the document kind. Unset members are `None`.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct FieldRecord {
            $(pub $tfield: Option<String>,)+
            $(pub $dfield: Option<NaiveDate>,)+
            /// Recognized text the record was extracted from, kept for audit.
            pub raw_text: String,
        }

        impl FieldRecord {
            pub fn get(&self, name: FieldName) -> Option<FieldValue> {
                match name {
                    $(FieldName::$tname => self.$tfield.clone().map(FieldValue::Text),)+
                    $(FieldName::$dname => self.$dfield.map(FieldValue::Date),)+
                }
            }

            /// Store `value` under `name`. A value of the wrong shape for the
            /// field (text into a date field or the reverse) is dropped.
            pub fn set(&mut self, name: FieldName, value: FieldValue) {
                match (name, value) {
                    $((FieldName::$tname, FieldValue::Text(v)) => self.$tfield = Some(v),)+
                    $((FieldName::$dname, FieldValue::Date(v)) => self.$dfield = Some(v),)+
                    (name, value) => tracing::warn!(
                        field = name.as_str(),
                        value = %value,
                        "Dropping value with mismatched field shape"
                    ),
                }
            }
        }
    };
}

field_record! {
    text {
        full_name => FullName,
        document_number => DocumentNumber,
        country_of_issuance => CountryOfIssuance,
        sevis_id => SevisId,
        school_name => SchoolName,
        degree_level => DegreeLevel,
        major_field => MajorField,
        ead_category => EadCategory,
        passport_number => PassportNumber,
        nationality => Nationality,
        place_of_birth => PlaceOfBirth,
        visa_type => VisaType,
        visa_number => VisaNumber,
        entries_allowed => EntriesAllowed,
        admission_number => AdmissionNumber,
        class_of_admission => ClassOfAdmission,
        receipt_number => ReceiptNumber,
        case_type => CaseType,
        petitioner_name => PetitionerName,
        beneficiary_name => BeneficiaryName,
    }
    date {
        issued_date => IssuedDate,
        expiration_date => ExpirationDate,
        program_end_date => ProgramEndDate,
        valid_from => ValidFrom,
        valid_until => ValidUntil,
        date_of_birth => DateOfBirth,
        admit_until_date => AdmitUntilDate,
    }
}

impl FieldRecord {
    /// Empty record that still carries the source text.
    pub fn with_raw_text(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Default::default()
        }
    }

    pub fn populated_count(&self) -> usize {
        FieldName::ALL.iter().filter(|n| self.get(**n).is_some()).count()
    }
}
