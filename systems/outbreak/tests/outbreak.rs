use outbreak_core::{CellCoord, Command, Event, GridSize};
use outbreak_system_outbreak::{
    build_world, setup_commands, state, Outbreak, OutbreakError, OutbreakReport, OutbreakState,
};
use outbreak_system_validation::{validate, ValidatedSetup};
use outbreak_world::query;

const DEFAULT_SETUP: [&str; 4] = ["4", "(2,1)", "(0,1)(1,2)(3,1)", "DLUURR"];

fn setup(lines: &[&str]) -> ValidatedSetup {
    validate(lines).expect("set-up should be valid")
}

#[test]
fn setup_commands_configure_then_place_entities() {
    let commands = setup_commands(&setup(&DEFAULT_SETUP));

    assert!(matches!(
        commands.first(),
        Some(Command::ConfigureWorld { size, .. }) if *size == GridSize::new(4)
    ));
    assert_eq!(
        commands[1],
        Command::PlaceZombie {
            cell: CellCoord::new(2, 1),
        }
    );
    assert_eq!(commands.len(), 5);
}

#[test]
fn build_world_populates_grid_queue_and_script() {
    let mut events = Vec::new();
    let world = build_world(&setup(&DEFAULT_SETUP), &mut events);

    assert_eq!(query::size(&world), GridSize::new(4));
    assert_eq!(query::occupied_cells(&world).len(), 3);
    assert_eq!(query::pending_zombies(&world), vec![CellCoord::new(2, 1)]);
    assert!(query::finished_zombies(&world).is_empty());
    assert_eq!(query::movement_script(&world).as_str(), "DLUURR");
    assert_eq!(query::score(&world), 0);
    assert_eq!(state(&world), OutbreakState::Running);
    assert_eq!(events.len(), 5);
}

#[test]
fn duplicate_creature_cells_share_a_bucket() {
    let mut events = Vec::new();
    let world = build_world(&setup(&["3", "(0,0)", "(1,1)(1,1)(2,2)", "R"]), &mut events);

    assert_eq!(query::occupied_cells(&world).len(), 2);
    assert_eq!(query::creatures_at(&world, CellCoord::new(1, 1)), 2);
}

#[test]
fn default_setup_runs_to_expected_report() {
    let mut events = Vec::new();
    let mut world = build_world(&setup(&DEFAULT_SETUP), &mut events);

    let report = Outbreak::new()
        .run(&mut world, |_| {})
        .expect("outbreak completes");

    assert_eq!(report.score(), 3);
    assert_eq!(
        report.positions(),
        &[
            CellCoord::new(3, 0),
            CellCoord::new(2, 1),
            CellCoord::new(1, 0),
            CellCoord::new(0, 0),
        ]
    );
    assert_eq!(
        report.to_string(),
        "zombies score: 3\nzombies positions: (3, 0) (2, 1) (1, 0) (0, 0)"
    );
    assert_eq!(state(&world), OutbreakState::Done);
}

#[test]
fn advance_processes_exactly_one_zombie() {
    let mut events = Vec::new();
    let mut world = build_world(&setup(&DEFAULT_SETUP), &mut events);
    let mut outbreak = Outbreak::new();

    let mut events = Vec::new();
    let progress = outbreak.advance(&mut world, &mut events).expect("advance");

    assert_eq!(progress, OutbreakState::Running);
    assert_eq!(outbreak.advances(), 1);
    assert_eq!(query::finished_zombies(&world), vec![CellCoord::new(3, 0)]);
    assert_eq!(query::pending_zombies(&world), vec![CellCoord::new(1, 2)]);
    assert_eq!(query::score(&world), 1);
}

#[test]
fn each_zombie_finishes_its_script_before_the_next_starts() {
    let mut events = Vec::new();
    let mut world = build_world(&setup(&DEFAULT_SETUP), &mut events);

    let mut observed = Vec::new();
    let _ = Outbreak::new()
        .run(&mut world, |event| observed.push(event.clone()))
        .expect("outbreak completes");

    let script_length = 6;
    let mut steps_since_finish = 0;
    for event in &observed {
        match event {
            Event::ZombieStepped { .. } | Event::MovementSkipped { .. } => steps_since_finish += 1,
            Event::ZombieFinished { .. } => {
                assert_eq!(steps_since_finish, script_length);
                steps_since_finish = 0;
            }
            _ => {}
        }
    }
    assert_eq!(observed.last(), Some(&Event::OutbreakEnded { score: 3 }));
}

#[test]
fn score_never_decreases_and_cells_are_consumed_once() {
    let mut events = Vec::new();
    let mut world = build_world(
        &setup(&["3", "(0,0)", "(0,1)(0,1)(1,1)(2,2)", "DRDRUL"]),
        &mut events,
    );

    let mut consumed = Vec::new();
    let mut running_total = 0;
    let report = Outbreak::new()
        .run(&mut world, |event| {
            if let Event::CreaturesInfected { cell, count } = event {
                assert!(!consumed.contains(cell), "cell {cell} infected twice");
                consumed.push(*cell);
                running_total += count;
            }
        })
        .expect("outbreak completes");

    assert_eq!(report.score(), running_total);
    assert_eq!(report.score(), 4);
    assert_eq!(report.positions().len(), 5);
}

#[test]
fn infection_order_is_breadth_first() {
    // The first zombie infects (1,0) then (2,0); each newcomer walks the same script.
    let mut events = Vec::new();
    let mut world = build_world(&setup(&["5", "(0,0)", "(2,0)(1,0)", "RR"]), &mut events);

    let report = Outbreak::new()
        .run(&mut world, |_| {})
        .expect("outbreak completes");

    assert_eq!(report.score(), 2);
    assert_eq!(
        report.positions(),
        &[
            CellCoord::new(2, 0),
            CellCoord::new(3, 0),
            CellCoord::new(4, 0),
        ]
    );
}

#[test]
fn lone_zombie_finishes_with_zero_score() {
    let mut events = Vec::new();
    let mut world = build_world(&setup(&["3", "(0,0)", "", "UUUDLLRRR"]), &mut events);

    let report = Outbreak::new()
        .run(&mut world, |_| {})
        .expect("outbreak completes");

    assert_eq!(report.score(), 0);
    assert_eq!(report.positions(), &[CellCoord::new(1, 1)]);
}

#[test]
fn invalid_movements_leave_zombie_in_place() {
    let mut events = Vec::new();
    let mut world = build_world(&setup(&["3", "(0,0)", "", "GKWE"]), &mut events);

    let mut skipped = 0;
    let report = Outbreak::new()
        .run(&mut world, |event| {
            if matches!(event, Event::MovementSkipped { .. }) {
                skipped += 1;
            }
        })
        .expect("outbreak completes");

    assert_eq!(skipped, 4);
    assert_eq!(report.score(), 0);
    assert_eq!(report.positions(), &[CellCoord::new(0, 0)]);
}

#[test]
fn world_without_zombie_is_done_immediately() {
    let mut events = Vec::new();
    let mut world = build_world(&setup(&["3", "", "(1,1)", "R"]), &mut events);
    assert_eq!(state(&world), OutbreakState::Done);

    let mut outbreak = Outbreak::new();
    let report = outbreak.run(&mut world, |_| {}).expect("outbreak completes");

    assert_eq!(outbreak.advances(), 0);
    assert_eq!(report.score(), 0);
    assert!(report.positions().is_empty());
    assert_eq!(report.to_string(), "zombies score: 0\nzombies positions: ");
}

#[test]
fn advance_limit_stops_a_long_outbreak() {
    let mut events = Vec::new();
    let mut world = build_world(&setup(&DEFAULT_SETUP), &mut events);

    let error = Outbreak::with_advance_limit(2)
        .run(&mut world, |_| {})
        .expect_err("limit should be hit");

    assert_eq!(error, OutbreakError::AdvanceLimitExceeded { limit: 2 });
    assert_eq!(query::finished_zombies(&world).len(), 2);
}

#[test]
fn advance_limit_matching_population_succeeds() {
    let mut events = Vec::new();
    let mut world = build_world(&setup(&DEFAULT_SETUP), &mut events);

    let report = Outbreak::with_advance_limit(4)
        .run(&mut world, |_| {})
        .expect("four advances suffice");
    assert_eq!(report.score(), 3);
}

#[test]
fn report_serializes_score_and_positions() {
    let mut events = Vec::new();
    let mut world = build_world(&setup(&["2", "(0,0)", "(1,0)", "R"]), &mut events);
    let report = Outbreak::new()
        .run(&mut world, |_| {})
        .expect("outbreak completes");

    let json = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(
        json,
        serde_json::json!({
            "score": 1,
            "positions": [
                { "column": 1, "row": 0 },
                { "column": 0, "row": 0 },
            ],
        })
    );
    assert_eq!(report, OutbreakReport::from_world(&world));
}
