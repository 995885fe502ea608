//! KENDO Demo Application
//!
//! Drives a synthetic pose feed through the full pipeline:
//! - Overhead strike to start the game
//! - A scripted hand that chases falling fruit
//! - Standing idle until game over, then a swipe to restart

use kendo_core::{GameConfig, GestureConfig, Joint, Point};
use kendo_game::{FruitState, GameEngine, GamePhase, GameSnapshot};
use kendo_gesture::GestureClassifier;
use kendo_test::{left_swipe_script, overhead_strike_script, ArcadeHarness, PoseRig};

/// How fast the scripted hand moves per frame (normalized units)
const HAND_STEP: f32 = 0.06;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║              KENDO Demo - Fruit Arcade                     ║");
    println!("║        Gesture-driven session on a synthetic feed          ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();

    let gesture_config = GestureConfig::default();
    gesture_config.validate()?;
    let game_config = GameConfig::default();
    game_config.validate()?;

    let mut harness = ArcadeHarness::with_parts(
        GestureClassifier::new(gesture_config),
        GameEngine::with_seed(game_config, 0xC0FFEE),
    );

    // Phase 1: overhead strike starts the game
    println!("-- Phase 1: sword overhead strike");
    for symbol in harness.run(&overhead_strike_script()) {
        if !symbol.is_none() {
            println!("   detected: {}", symbol.name());
        }
    }
    print_state(&harness.engine.snapshot(harness.now()));

    // Phase 2: chase falling fruit with the left hand for ~25 seconds
    println!("-- Phase 2: slicing run");
    let rig = PoseRig::standing();
    let mut hand = rig.joint(Joint::LeftWrist);
    let mut last_score = harness.engine.score();

    for _ in 0..750 {
        let snapshot = harness.engine.snapshot(harness.now());
        if snapshot.over {
            break;
        }

        if let Some(target) = lowest_falling(&snapshot) {
            hand = step_toward(hand, target);
        }

        let frame = rig.clone().with_joint(Joint::LeftWrist, hand.x, hand.y).frame();
        let symbol = harness.step(&frame);
        if !symbol.is_none() {
            println!("   detected: {}", symbol.name());
        }

        let score = harness.engine.score();
        if score > last_score {
            println!("   sliced! score {} -> {}", last_score, score);
            last_score = score;
        }
    }
    print_state(&harness.engine.snapshot(harness.now()));

    // Phase 3: stand still until the fruits win
    println!("-- Phase 3: standing idle until game over");
    let idle = PoseRig::standing().frame();
    for _ in 0..4000 {
        if harness.engine.phase() == GamePhase::GameOver {
            break;
        }
        harness.step(&idle);
    }
    print_state(&harness.engine.snapshot(harness.now()));

    // Phase 4: any gesture restarts
    println!("-- Phase 4: swipe to restart");
    for symbol in harness.run(&left_swipe_script()) {
        if !symbol.is_none() {
            println!("   detected: {}", symbol.name());
        }
    }
    print_state(&harness.engine.snapshot(harness.now()));

    println!();
    println!("Done.");
    Ok(())
}

/// The falling fruit closest to the miss line.
fn lowest_falling(snapshot: &GameSnapshot) -> Option<Point> {
    snapshot
        .fruits
        .iter()
        .filter(|f| f.state == FruitState::Falling)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|f| f.pos)
}

/// Move the hand one bounded step toward a target.
fn step_toward(hand: Point, target: Point) -> Point {
    let step = |from: f32, to: f32| {
        let delta = (to - from).clamp(-HAND_STEP, HAND_STEP);
        from + delta
    };
    Point::new(step(hand.x, target.x), step(hand.y, target.y))
}

fn print_state(snapshot: &GameSnapshot) {
    let falling = snapshot
        .fruits
        .iter()
        .filter(|f| f.state == FruitState::Falling)
        .count();
    println!(
        "   [t={}s] score {} | level {} | missed {} | falling {} | started {} | over {} | showing: {}",
        snapshot.elapsed_secs,
        snapshot.score,
        snapshot.level,
        snapshot.missed,
        falling,
        snapshot.started,
        snapshot.over,
        snapshot.display_gesture.name(),
    );
}
