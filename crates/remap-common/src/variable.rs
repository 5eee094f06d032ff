//! Scalar fields that were remapped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{RemapError, RemapResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Variable {
    AnalyticalFun1,
    AnalyticalFun2,
    CloudFraction,
    Topography,
    TotalPrecipWater,
}

impl Variable {
    pub const ALL: [Variable; 5] = [
        Variable::AnalyticalFun1,
        Variable::AnalyticalFun2,
        Variable::CloudFraction,
        Variable::Topography,
        Variable::TotalPrecipWater,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Variable::AnalyticalFun1 => "AnalyticalFun1",
            Variable::AnalyticalFun2 => "AnalyticalFun2",
            Variable::CloudFraction => "CloudFraction",
            Variable::Topography => "Topography",
            Variable::TotalPrecipWater => "TotalPrecipWater",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|v| v == self)
            .unwrap_or_default()
    }

    pub fn from_index(index: usize) -> RemapResult<Self> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            RemapError::invalid("variable", format!("index {} out of range [0, 5)", index))
        })
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Variable {
    type Err = RemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(index) = s.trim().parse::<usize>() {
            return Self::from_index(index);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.token().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RemapError::unknown("variable", s))
    }
}

impl TryFrom<String> for Variable {
    type Error = RemapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Variable> for String {
    fn from(variable: Variable) -> Self {
        variable.token().to_string()
    }
}
