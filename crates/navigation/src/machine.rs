use foundation::{AdminLevel, AdministrativeUnit};

use crate::selection::{NavState, SelectionPath};

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    SelectProvince(AdministrativeUnit),
    /// Candidates are expected to be filtered by parent already.
    SelectRegency(AdministrativeUnit),
    SelectDistrict(AdministrativeUnit),
    /// Pops one level.
    Back,
    /// Drops the whole path.
    Reset,
}

impl Transition {
    pub fn name(&self) -> &'static str {
        match self {
            Transition::SelectProvince(_) => "select-province",
            Transition::SelectRegency(_) => "select-regency",
            Transition::SelectDistrict(_) => "select-district",
            Transition::Back => "back",
            Transition::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// The transition is not allowed from this state.
    InvalidTransition {
        transition: &'static str,
        state: NavState,
    },
    /// A unit of the wrong level was passed to a select transition.
    LevelMismatch {
        expected: AdminLevel,
        found: AdminLevel,
    },
}

impl std::fmt::Display for NavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavError::InvalidTransition { transition, state } => {
                write!(f, "cannot {transition} from {state}")
            }
            NavError::LevelMismatch { expected, found } => {
                write!(f, "expected a {expected} unit, got a {found} unit")
            }
        }
    }
}

impl std::error::Error for NavError {}

impl SelectionPath {
    /// Returns the path after `transition`; `self` is left untouched.
    pub fn apply(&self, transition: Transition) -> Result<SelectionPath, NavError> {
        let state = self.state();
        let invalid = |t: &Transition| NavError::InvalidTransition {
            transition: t.name(),
            state,
        };

        let (required, unit) = match &transition {
            Transition::SelectProvince(u) => (NavState::Root, u),
            Transition::SelectRegency(u) => (NavState::ProvinceSelected, u),
            Transition::SelectDistrict(u) => (NavState::RegencySelected, u),
            Transition::Back | Transition::Reset => {
                if state == NavState::Root {
                    return Err(invalid(&transition));
                }
                let keep = match transition {
                    Transition::Back => self.units.len() - 1,
                    _ => 0,
                };
                return Ok(SelectionPath {
                    units: self.units[..keep].to_vec(),
                });
            }
        };

        if state != required {
            return Err(invalid(&transition));
        }
        let expected =
            AdminLevel::from_depth(self.depth() + 1).ok_or_else(|| invalid(&transition))?;
        if unit.level != expected {
            return Err(NavError::LevelMismatch {
                expected,
                found: unit.level,
            });
        }

        let mut units = self.units.clone();
        units.push(unit.clone());
        Ok(SelectionPath { units })
    }
}
