//! tplanner entrypoint.

use training_planner::run;
use training_planner::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
