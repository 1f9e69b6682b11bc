use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

const DESC_WIDTH: usize = 20;
const MILLIS_WIDTH: usize = 12;
const MICROS_WIDTH: usize = 15;
const INDENT: usize = 4;

/// Wall-clock time spent in each pipeline stage.
#[derive(Default)]
pub struct Timer {
    start: Option<Instant>,
    measurements: Vec<Measurement>,
}

struct Measurement {
    name: &'static str,
    elapsed: Duration,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, description: &'static str) {
        self.start = Some(Instant::now());
        self.measurements.push(Measurement {
            name: description,
            elapsed: Duration::ZERO,
        });
    }

    pub fn stop(&mut self) {
        if let (Some(start), Some(last)) = (self.start.take(), self.measurements.last_mut()) {
            last.elapsed = start.elapsed();
        }
    }

    /// Runs `f` as the stage `description`.
    pub fn measure<T>(&mut self, description: &'static str, f: impl FnOnce() -> T) -> T {
        self.start(description);
        let result = f();
        self.stop();
        result
    }

    pub fn stages(&self) -> impl Iterator<Item = (&'static str, Duration)> + '_ {
        self.measurements.iter().map(|m| (m.name, m.elapsed))
    }

    fn rule(&self, left: char, mid: char, right: char) -> String {
        format!(
            "{}{}{}{}{}{}{}{}",
            " ".repeat(INDENT),
            left,
            "═".repeat(DESC_WIDTH),
            mid,
            "═".repeat(MILLIS_WIDTH),
            mid,
            "═".repeat(MICROS_WIDTH),
            right
        )
    }

    fn row(&self, desc: &str, millis: &str, micros: &str) -> String {
        format!(
            "{}║{:^dw$}║{:^mw$}║{:^uw$}║",
            " ".repeat(INDENT),
            desc,
            millis,
            micros,
            dw = DESC_WIDTH,
            mw = MILLIS_WIDTH,
            uw = MICROS_WIDTH
        )
    }
}

/*  ╔═════╦═════╗
 *  ╠═════╬═════╣
 *  ║     ║     ║
 *  ╚═════╩═════╝ */
impl Display for Timer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.rule('╔', '╦', '╗'))?;
        writeln!(f, "{}", self.row("Stage", "Millis", "Micros"))?;
        writeln!(f, "{}", self.rule('╠', '╬', '╣'))?;
        for m in &self.measurements {
            let name: String = m.name.chars().take(DESC_WIDTH).collect();
            writeln!(
                f,
                "{}",
                self.row(
                    &name,
                    &format!("{:.3}", m.elapsed.as_secs_f64() * 1000.0),
                    &m.elapsed.as_micros().to_string()
                )
            )?;
        }
        writeln!(f, "{}", self.rule('╚', '╩', '╝'))?;
        Ok(())
    }
}
