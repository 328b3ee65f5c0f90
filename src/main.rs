//! Chipfall entry point
//!
//! Headless demo driver standing in for the browser host: pumps frames,
//! ticks the countdown once per simulated second, and plays a simple
//! scripted strategy until the session terminates.

use chipfall::{Outcome, QuestionBank, Resolution, Rules, Session};

/// Simulated animation frames per countdown second
const FRAME_RATE: u64 = 60;
/// Hard stop so a pathological seed cannot spin forever
const MAX_FRAMES: u64 = 600 * FRAME_RATE;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC41F);

    let bank = match QuestionBank::bundled() {
        Ok(bank) => bank,
        Err(err) => {
            log::error!("Question bundle rejected: {err}");
            std::process::exit(1);
        }
    };

    log::info!("Chipfall demo starting with seed {seed}");
    let mut session = Session::new(seed, Rules::default(), bank);

    let mut frames: u64 = 0;
    while session.outcome() == Outcome::InProgress && frames < MAX_FRAMES {
        if !session.board().ball_in_flight() {
            let _ = session.request_drop();
        }
        if session.pending_question().is_none() {
            let _ = session.request_question();
        } else if frames % (3 * FRAME_RATE) == 0 {
            // Think for a few seconds, then commit to the first option
            if let Some(pending) = session.pending_question() {
                let choice = pending.question.options[0].clone();
                match session.submit_answer(&choice) {
                    Ok(Resolution::Correct { reward }) => {
                        log::info!("Demo guessed right for {reward:+}")
                    }
                    Ok(_) => log::info!("Demo guessed wrong"),
                    Err(err) => log::warn!("Answer rejected: {err}"),
                }
            }
        }

        session.frame();
        if frames % FRAME_RATE == 0 {
            session.second();
        }
        frames += 1;
    }

    let secs = frames / FRAME_RATE;
    match session.outcome() {
        Outcome::Won(reason) => {
            println!("Won ({reason:?}) with {} chips after {secs}s", session.chips())
        }
        Outcome::Lost => println!("Lost after {secs}s"),
        Outcome::InProgress => println!(
            "Stopped after {secs}s with {} chips and {} questions left",
            session.chips(),
            session.questions_remaining()
        ),
    }
}
