use frag_ana::selection::most_energetic;
use frag_ana::{select, GroupExport, ResolverOptions, SelectedRow, SelectionPolicy};
use frag_core::{Event, FourMomentum, Particle, Vertex};

fn particle(id: i32, status: i32, e: f64, time: f64) -> Particle {
    Particle::new(id, status, FourMomentum::new(0.0, 0.1, e * 0.9, e), 0.14)
        .with_mothers(1, 2)
        .with_production(Vertex::new(0.0, 0.0, 0.0, time))
}

fn event() -> Event {
    let mut event = Event::new();
    event.push(particle(22, 91, 0.7, 2.0));
    event.push(particle(211, -83, 3.0, 0.5));
    event.push(particle(-211, 84, 2.0, 0.5));
    event.push(particle(111, 83, 4.0, 1.5));
    event.push(particle(211, 91, 1.0, 3.0));
    event
}

fn apply(policy: &SelectionPolicy, event: &Event) -> Vec<SelectedRow> {
    select(event, policy, &ResolverOptions::default(), 10.0).rows
}

#[test]
fn group_export_suffixes_multiple_members() {
    let rows = apply(&SelectionPolicy::default(), &event());
    assert_eq!(
        rows,
        vec![
            SelectedRow {
                index: 2,
                suffix: Some(1)
            },
            SelectedRow {
                index: 3,
                suffix: Some(2)
            },
        ]
    );
}

#[test]
fn single_member_group_has_no_suffix() {
    let mut event = event();
    event.get_mut(3).expect("entry").production = Some(Vertex::new(0.0, 0.0, 0.0, 0.9));
    let selection = select(&event, &SelectionPolicy::default(), &ResolverOptions::default(), 10.0);
    assert_eq!(
        selection.rows,
        vec![SelectedRow {
            index: 2,
            suffix: None
        }]
    );
    assert!(selection.resolution.is_some());
}

#[test]
fn most_energetic_group_member_only() {
    let policy = SelectionPolicy::FirstHadronGroup {
        export: GroupExport::MostEnergetic,
    };
    let rows = apply(&policy, &event());
    assert_eq!(
        rows,
        vec![SelectedRow {
            index: 2,
            suffix: None
        }]
    );
}

#[test]
fn no_primaries_means_no_rows() {
    let mut event = Event::new();
    event.push(particle(211, 91, 1.0, 0.0));
    let selection = select(&event, &SelectionPolicy::default(), &ResolverOptions::default(), 10.0);
    assert!(selection.rows.is_empty());
    assert!(selection.resolution.is_none());
}

#[test]
fn all_final_hadrons_skip_photons_and_decayed_entries() {
    let rows = apply(&SelectionPolicy::AllFinalHadrons, &event());
    let indices: Vec<usize> = rows.iter().map(|row| row.index).collect();
    assert_eq!(indices, vec![3, 4, 5]);
}

#[test]
fn leading_pion_ignores_decayed_entries() {
    let rows = apply(&SelectionPolicy::leading_pion(), &event());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].index, 4);
}

#[test]
fn leading_pion_is_absent_without_pions() {
    let mut event = Event::new();
    event.push(particle(22, 91, 5.0, 0.0));
    event.push(particle(321, 83, 5.0, 0.0));
    assert!(apply(&SelectionPolicy::leading_pion(), &event).is_empty());
}

#[test]
fn energy_ties_keep_the_earlier_entry() {
    let mut event = Event::new();
    event.push(particle(211, 91, 2.0, 0.0));
    event.push(particle(-211, 91, 2.0, 0.0));
    assert_eq!(most_energetic(&event, &[211, -211]), Some(1));
    assert_eq!(most_energetic(&event, &[-211]), Some(2));
}

#[test]
fn first_final_takes_any_species() {
    let rows = apply(&SelectionPolicy::FirstFinal, &event());
    assert_eq!(rows[0].index, 1);
}

#[test]
fn policies_parse_from_tagged_yaml() {
    let policy: SelectionPolicy =
        serde_yaml::from_str("type: most-energetic\nspecies: [111, 211, -211]\n").expect("yaml");
    assert_eq!(policy, SelectionPolicy::leading_pion());
    let policy: SelectionPolicy = serde_yaml::from_str("type: first-hadron-group\n").expect("yaml");
    assert_eq!(policy, SelectionPolicy::default());
}
