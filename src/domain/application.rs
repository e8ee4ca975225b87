//! Loan application draft.
//!
//! The draft is the single mutable record accumulated by the wizard. Every
//! field holds a valid default from the moment a session starts, so the
//! draft is submittable whenever the final step is reached. Categorical
//! fields are modeled as enums whose serde renames produce the exact wire
//! strings the prediction service expects.

use serde::{Deserialize, Serialize};

use super::wizard::WizardError;

/// The fixed set of loan terms offered, in months.
pub const LOAN_TERMS: [u32; 10] = [12, 36, 60, 84, 120, 180, 240, 300, 360, 480];

/// Fields that are coerced to numbers when updated from raw input.
/// Everything else is a categorical string.
pub const NUMERIC_FIELDS: [&str; 5] = [
    "ApplicantIncome",
    "CoapplicantIncome",
    "LoanAmount",
    "Loan_Amount_Term",
    "Credit_History",
];

/// Applicant gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Marital status. Serialized as "Yes"/"No" on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    #[serde(rename = "Yes")]
    Married,
    #[serde(rename = "No")]
    Single,
}

impl MaritalStatus {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Yes" => Some(MaritalStatus::Married),
            "No" => Some(MaritalStatus::Single),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            MaritalStatus::Married => "Yes",
            MaritalStatus::Single => "No",
        }
    }
}

/// Number of dependents. "3+" is an open upper bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dependents {
    #[serde(rename = "0")]
    None,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3+")]
    ThreeOrMore,
}

impl Dependents {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "0" => Some(Dependents::None),
            "1" => Some(Dependents::One),
            "2" => Some(Dependents::Two),
            "3+" => Some(Dependents::ThreeOrMore),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Dependents::None => "0",
            Dependents::One => "1",
            Dependents::Two => "2",
            Dependents::ThreeOrMore => "3+",
        }
    }
}

/// Education level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Education {
    Graduate,
    #[serde(rename = "Not Graduate")]
    NotGraduate,
}

impl Education {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Graduate" => Some(Education::Graduate),
            "Not Graduate" => Some(Education::NotGraduate),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Education::Graduate => "Graduate",
            Education::NotGraduate => "Not Graduate",
        }
    }
}

/// Self-employment flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelfEmployed {
    Yes,
    No,
}

impl SelfEmployed {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Yes" => Some(SelfEmployed::Yes),
            "No" => Some(SelfEmployed::No),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            SelfEmployed::Yes => "Yes",
            SelfEmployed::No => "No",
        }
    }
}

/// Property area of the financed property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyArea {
    Urban,
    Semiurban,
    Rural,
}

impl PropertyArea {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Urban" => Some(PropertyArea::Urban),
            "Semiurban" => Some(PropertyArea::Semiurban),
            "Rural" => Some(PropertyArea::Rural),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            PropertyArea::Urban => "Urban",
            PropertyArea::Semiurban => "Semiurban",
            PropertyArea::Rural => "Rural",
        }
    }
}

/// Credit history flag. Serialized as the number 0 or 1 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CreditHistory {
    Bad,
    Good,
}

impl From<CreditHistory> for u8 {
    fn from(value: CreditHistory) -> u8 {
        match value {
            CreditHistory::Bad => 0,
            CreditHistory::Good => 1,
        }
    }
}

impl TryFrom<u8> for CreditHistory {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CreditHistory::Bad),
            1 => Ok(CreditHistory::Good),
            other => Err(format!("credit history must be 0 or 1, got {}", other)),
        }
    }
}

/// Loan term in months, restricted to the offered term set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub struct LoanTerm(u32);

impl LoanTerm {
    /// Creates a term, rejecting values outside [`LOAN_TERMS`].
    pub fn try_new(months: u32) -> Result<Self, String> {
        if LOAN_TERMS.contains(&months) {
            Ok(Self(months))
        } else {
            Err(format!("{} is not an offered loan term", months))
        }
    }

    /// Term length in months.
    pub fn months(&self) -> u32 {
        self.0
    }
}

impl From<LoanTerm> for u32 {
    fn from(value: LoanTerm) -> u32 {
        value.0
    }
}

impl TryFrom<u32> for LoanTerm {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        LoanTerm::try_new(value)
    }
}

/// The applicant's financial profile as submitted to the prediction
/// service.
///
/// Serde renames produce the exact 11-key wire body; serializing a draft
/// with `serde_json` yields the request payload as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Married")]
    pub marital_status: MaritalStatus,
    #[serde(rename = "Dependents")]
    pub dependents: Dependents,
    #[serde(rename = "Education")]
    pub education: Education,
    #[serde(rename = "Self_Employed")]
    pub self_employed: SelfEmployed,
    #[serde(rename = "ApplicantIncome")]
    pub applicant_income: f64,
    #[serde(rename = "CoapplicantIncome")]
    pub coapplicant_income: f64,
    #[serde(rename = "LoanAmount")]
    pub loan_amount: f64,
    #[serde(rename = "Loan_Amount_Term")]
    pub loan_term: LoanTerm,
    #[serde(rename = "Credit_History")]
    pub credit_history: CreditHistory,
    #[serde(rename = "Property_Area")]
    pub property_area: PropertyArea,
}

impl Default for LoanApplication {
    /// The initial form values: a married male graduate with good credit
    /// applying for a 150k loan over 30 years.
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            marital_status: MaritalStatus::Married,
            dependents: Dependents::None,
            education: Education::Graduate,
            self_employed: SelfEmployed::No,
            applicant_income: 5000.0,
            coapplicant_income: 0.0,
            loan_amount: 150.0,
            loan_term: LoanTerm(360),
            credit_history: CreditHistory::Good,
            property_area: PropertyArea::Urban,
        }
    }
}

impl LoanApplication {
    /// Applies a raw field update by wire field name.
    ///
    /// Fields in [`NUMERIC_FIELDS`] are coerced to numbers; all others are
    /// parsed into their categorical enums. An unknown field name or an
    /// unparsable value is an integration defect and returns a
    /// [`WizardError`] rather than silently dropping the update.
    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<(), WizardError> {
        let invalid = |field: &'static str| WizardError::InvalidValue {
            field,
            raw: raw.to_string(),
        };

        match name {
            "Gender" => {
                self.gender = Gender::from_wire(raw).ok_or_else(|| invalid("Gender"))?;
            }
            "Married" => {
                self.marital_status =
                    MaritalStatus::from_wire(raw).ok_or_else(|| invalid("Married"))?;
            }
            "Dependents" => {
                self.dependents =
                    Dependents::from_wire(raw).ok_or_else(|| invalid("Dependents"))?;
            }
            "Education" => {
                self.education = Education::from_wire(raw).ok_or_else(|| invalid("Education"))?;
            }
            "Self_Employed" => {
                self.self_employed =
                    SelfEmployed::from_wire(raw).ok_or_else(|| invalid("Self_Employed"))?;
            }
            "ApplicantIncome" => {
                let value: f64 = raw.parse().map_err(|_| invalid("ApplicantIncome"))?;
                if !value.is_finite() || value < 0.0 {
                    return Err(invalid("ApplicantIncome"));
                }
                self.applicant_income = value;
            }
            "CoapplicantIncome" => {
                let value: f64 = raw.parse().map_err(|_| invalid("CoapplicantIncome"))?;
                if !value.is_finite() || value < 0.0 {
                    return Err(invalid("CoapplicantIncome"));
                }
                self.coapplicant_income = value;
            }
            "LoanAmount" => {
                let value: f64 = raw.parse().map_err(|_| invalid("LoanAmount"))?;
                if !value.is_finite() || value <= 0.0 {
                    return Err(invalid("LoanAmount"));
                }
                self.loan_amount = value;
            }
            "Loan_Amount_Term" => {
                let months: u32 = raw.parse().map_err(|_| invalid("Loan_Amount_Term"))?;
                self.loan_term =
                    LoanTerm::try_new(months).map_err(|_| invalid("Loan_Amount_Term"))?;
            }
            "Credit_History" => {
                let flag: u8 = raw.parse().map_err(|_| invalid("Credit_History"))?;
                self.credit_history =
                    CreditHistory::try_from(flag).map_err(|_| invalid("Credit_History"))?;
            }
            "Property_Area" => {
                self.property_area =
                    PropertyArea::from_wire(raw).ok_or_else(|| invalid("Property_Area"))?;
            }
            unknown => {
                return Err(WizardError::UnknownField {
                    name: unknown.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Current value of a field by wire name, formatted for display.
    pub fn display_value(&self, name: &str) -> Option<String> {
        let value = match name {
            "Gender" => self.gender.as_wire().to_string(),
            "Married" => self.marital_status.as_wire().to_string(),
            "Dependents" => self.dependents.as_wire().to_string(),
            "Education" => self.education.as_wire().to_string(),
            "Self_Employed" => self.self_employed.as_wire().to_string(),
            "ApplicantIncome" => format_amount(self.applicant_income),
            "CoapplicantIncome" => format_amount(self.coapplicant_income),
            "LoanAmount" => format_amount(self.loan_amount),
            "Loan_Amount_Term" => self.loan_term.months().to_string(),
            "Credit_History" => u8::from(self.credit_history).to_string(),
            "Property_Area" => self.property_area.as_wire().to_string(),
            _ => return None,
        };
        Some(value)
    }
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
