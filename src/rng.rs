use rand::Rng;

/// Source of uniformly distributed floats, injected into the scheduler so
/// the lunch window is deterministic under test.
pub trait UniformSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

/// Production source backed by the thread-local RNG.  Draws are independent
/// per call and per process, which is exactly what the lunch jitter wants.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl UniformSource for ThreadRngSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Replays a fixed sequence of values, then repeats the last one.
#[derive(Debug, Clone)]
pub struct FixedSource {
    values: Vec<f64>,
    next: usize,
}

impl FixedSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }
}

impl UniformSource for FixedSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        let value = self.values[self.next.min(self.values.len() - 1)];
        self.next += 1;
        value.clamp(low, high)
    }
}
