use crate::{Error, Result, Line, Ray, Point, Vector, Lengthf32, Intensityf32};

/// Copy exactly `D` elements out of `v`
pub fn to_array<T: Copy, const D: usize>(v: &[T]) -> Result<[T; D]> {
    v.try_into().map_err(|_| Error::Dimension { expected: D, got: v.len() })
}

/// Parse `2·D + 1` whitespace-separated numbers: origin, delta, measured value
pub fn parse_ray<const D: usize>(s: &str) -> std::result::Result<Ray<D>, String> {
    let n = s.split_whitespace()
        .map(|x| x.parse::<f32>().map_err(|e| format!("`{x}`: {e}")))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if n.len() != 2 * D + 1 {
        return Err(format!("expected {} numbers, found {}", 2 * D + 1, n.len()))
    }
    let origin: [Lengthf32; D] = std::array::from_fn(|i| n[i]);
    let delta : [Lengthf32; D] = std::array::from_fn(|i| n[D + i]);
    let value : Intensityf32 = n[2 * D];
    Ok(Ray::new(Line::new(Point::new(origin), Vector::new(delta)), value))
}

/// Group numeric digits to facilitate reading long numbers
pub fn group_digits<F: std::fmt::Display>(n: F) -> String {
    use numsep::{separate, Locale};
    separate(n, Locale::English)
}


pub mod timing {

    use super::group_digits;
    use std::time::Instant;
    use std::io::Write;

    pub struct Progress {
        previous: Instant,
    }

    impl Progress {

        #[allow(clippy::new_without_default)]
        pub fn new() -> Self { Self { previous: Instant::now() } }

        /// Print message, append ellipsis, flush stdout, stay on same line, start timer.
        pub fn start(&mut self, message: &str) {
            print!("{message} ... ");
            // A failed flush only delays the message
            std::io::stdout().flush().ok();
            self.start_timer();
        }

        /// Print message, go to next line, start timer
        pub fn startln(&mut self, message: &str) {
            self.start(message);
            println!();
            self.start_timer();
        }

        // Print time elapsed since last start or done
        pub fn done(&mut self) {
            println!("{} ms", group_digits(self.previous.elapsed().as_millis()));
            self.start_timer();
        }

        // Print message followed by time elapsed since last start or done
        pub fn done_with_message(&mut self, message: &str) {
            println!("{message}: {} ms",
                     group_digits(self.previous.elapsed().as_millis()));
            self.start_timer();
        }

        fn start_timer(&mut self) { self.previous = Instant::now() }
    }
}
