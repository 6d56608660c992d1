//! Per-event selection policies deciding which particles become rows.

use frag_core::Event;
use serde::{Deserialize, Serialize};

use crate::classifier::{final_hadrons, primary_candidates};
use crate::resolver::{resolve, Resolution, ResolverOptions};

/// Which members of the simultaneity group are exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupExport {
    /// Every member, suffixed `_1`, `_2`, ... when there is more than one.
    #[default]
    Group,
    /// Only the most energetic member.
    MostEnergetic,
}

/// Rule selecting the exported particles of one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Earliest produced primary hadron(s) from string fragmentation.
    FirstHadronGroup {
        /// Group export mode.
        #[serde(default)]
        export: GroupExport,
    },
    /// Every final-state hadron.
    AllFinalHadrons,
    /// Final-state particle of the listed species with strictly maximal energy.
    MostEnergetic {
        /// PDG codes eligible for selection (signs matter).
        species: Vec<i32>,
    },
    /// First final-state particle in record order.
    FirstFinal,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy::FirstHadronGroup {
            export: GroupExport::Group,
        }
    }
}

impl SelectionPolicy {
    /// Selection used for the most energetic charged or neutral pion.
    pub fn leading_pion() -> Self {
        SelectionPolicy::MostEnergetic {
            species: vec![111, 211, -211],
        }
    }
}

/// One selected particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedRow {
    /// Record index.
    pub index: usize,
    /// 1-based position within a multi-member group, used as label suffix.
    pub suffix: Option<usize>,
}

/// Result of applying a policy to one event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    /// Rows to export, in export order.
    pub rows: Vec<SelectedRow>,
    /// First-hadron resolution, present for the primary-hadron path when
    /// the event has candidates.
    pub resolution: Option<Resolution>,
}

impl Selection {
    fn single(index: Option<usize>) -> Self {
        Self {
            rows: index
                .map(|index| SelectedRow {
                    index,
                    suffix: None,
                })
                .into_iter()
                .collect(),
            resolution: None,
        }
    }
}

/// Applies `policy` to `event`.
pub fn select(
    event: &Event,
    policy: &SelectionPolicy,
    options: &ResolverOptions,
    string_energy: f64,
) -> Selection {
    match policy {
        SelectionPolicy::FirstHadronGroup { export } => {
            let candidates = primary_candidates(event);
            let Some(resolution) = resolve(event, &candidates, options, string_energy) else {
                return Selection::default();
            };
            let rows = match export {
                GroupExport::Group => {
                    let multiple = resolution.group.len() > 1;
                    resolution
                        .group
                        .iter()
                        .enumerate()
                        .map(|(position, member)| SelectedRow {
                            index: member.index,
                            suffix: multiple.then_some(position + 1),
                        })
                        .collect()
                }
                GroupExport::MostEnergetic => vec![SelectedRow {
                    index: resolution.most_energetic().index,
                    suffix: None,
                }],
            };
            Selection {
                rows,
                resolution: Some(resolution),
            }
        }
        SelectionPolicy::AllFinalHadrons => Selection {
            rows: final_hadrons(event)
                .into_iter()
                .map(|index| SelectedRow {
                    index,
                    suffix: None,
                })
                .collect(),
            resolution: None,
        },
        SelectionPolicy::MostEnergetic { species } => {
            Selection::single(most_energetic(event, species))
        }
        SelectionPolicy::FirstFinal => Selection::single(
            event
                .iter()
                .find(|(_, particle)| particle.is_final())
                .map(|(index, _)| index),
        ),
    }
}

/// Final-state particle among `species` with strictly maximal energy.
///
/// Energies must exceed zero; on ties the earlier record entry is kept.
pub fn most_energetic(event: &Event, species: &[i32]) -> Option<usize> {
    let mut best = None;
    let mut max_energy = 0.0;
    for (index, particle) in event.iter() {
        if particle.is_final() && species.contains(&particle.id) && particle.e() > max_energy {
            max_energy = particle.e();
            best = Some(index);
        }
    }
    best
}
