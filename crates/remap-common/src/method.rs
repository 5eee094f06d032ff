//! Remapping methods, their supported orders and named variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{RemapError, RemapResult};

/// A numerical remapping algorithm compared in the study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Method {
    /// Conservative flux-form remapping
    TempestRemap,
    /// Generalized moving least squares
    Gmls,
    /// Weighted least squares, essentially non-oscillatory
    WlsEnor,
    /// Earth System Modeling Framework regridder
    Esmf,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::TempestRemap,
        Method::Gmls,
        Method::WlsEnor,
        Method::Esmf,
    ];

    /// Name used in directory names and legends.
    pub fn token(&self) -> &'static str {
        match self {
            Method::TempestRemap => "TempestRemap",
            Method::Gmls => "GMLS",
            Method::WlsEnor => "WLS-ENOR",
            Method::Esmf => "ESMF",
        }
    }

    /// Legacy positional index (0: TempestRemap .. 3: ESMF).
    pub fn index(&self) -> usize {
        match self {
            Method::TempestRemap => 0,
            Method::Gmls => 1,
            Method::WlsEnor => 2,
            Method::Esmf => 3,
        }
    }

    pub fn from_index(index: usize) -> RemapResult<Self> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            RemapError::invalid("method", format!("index {} out of range [0, 4)", index))
        })
    }

    /// Polynomial orders for which metrics were produced.
    pub fn supported_orders(&self) -> &'static [u8] {
        match self {
            Method::TempestRemap => &[1, 2, 3, 4],
            Method::Gmls => &[2, 3, 4, 5],
            Method::WlsEnor => &[2, 3, 4],
            Method::Esmf => &[1, 2],
        }
    }

    pub fn supported_variants(&self) -> &'static [Variant] {
        match self {
            Method::Gmls => &[Variant::Default, Variant::Caas],
            _ => &[Variant::Default],
        }
    }

    /// Check that `order` is produced by this method.
    pub fn validate_order(&self, order: u8) -> RemapResult<()> {
        if self.supported_orders().contains(&order) {
            Ok(())
        } else {
            Err(RemapError::invalid(
                "order",
                format!(
                    "{} supports orders {:?}, got {}",
                    self,
                    self.supported_orders(),
                    order
                ),
            ))
        }
    }

    pub fn validate_variant(&self, variant: Variant) -> RemapResult<()> {
        if self.supported_variants().contains(&variant) {
            Ok(())
        } else {
            Err(RemapError::invalid(
                "variant",
                format!("{} has no '{}' variant", self, variant),
            ))
        }
    }

    /// Whether the directory degree is `order - 1` rather than `order`.
    pub fn uses_degree_offset(&self) -> bool {
        matches!(self, Method::TempestRemap | Method::Gmls)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Method {
    type Err = RemapError;

    /// Accepts the method name (case-insensitive) or its legacy index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(index) = s.trim().parse::<usize>() {
            return Self::from_index(index);
        }
        let normalized = s.trim().to_uppercase().replace('_', "-");
        match normalized.as_str() {
            "TEMPESTREMAP" | "TR" => Ok(Method::TempestRemap),
            "GMLS" => Ok(Method::Gmls),
            "WLS-ENOR" | "WLSENOR" => Ok(Method::WlsEnor),
            "ESMF" => Ok(Method::Esmf),
            _ => Err(RemapError::unknown("method", s)),
        }
    }
}

impl TryFrom<String> for Method {
    type Error = RemapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        method.token().to_string()
    }
}

/// Named dataset variant of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Default,
    /// Clip-and-assured-sum limiter applied after the remap
    Caas,
}

impl Variant {
    /// Suffix appended to the method directory, if any.
    pub fn dir_suffix(&self) -> Option<&'static str> {
        match self {
            Variant::Default => None,
            Variant::Caas => Some("CAAS"),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Default => f.write_str("default"),
            Variant::Caas => f.write_str("CAAS"),
        }
    }
}

impl FromStr for Variant {
    type Err = RemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" | "none" => Ok(Variant::Default),
            "caas" => Ok(Variant::Caas),
            _ => Err(RemapError::unknown("variant", s)),
        }
    }
}

/// ESMF regridding scheme, selected by the requested order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EsmfScheme {
    Conserve,
    Conserve2nd,
}

impl EsmfScheme {
    pub fn from_order(order: u8) -> RemapResult<Self> {
        match order {
            1 => Ok(EsmfScheme::Conserve),
            2 => Ok(EsmfScheme::Conserve2nd),
            _ => Err(RemapError::invalid(
                "order",
                format!("ESMF supports orders [1, 2], got {}", order),
            )),
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            EsmfScheme::Conserve => "conserve",
            EsmfScheme::Conserve2nd => "conserve2nd",
        }
    }
}

impl fmt::Display for EsmfScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
