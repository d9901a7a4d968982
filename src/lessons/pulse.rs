/// Bounces the red channel of a colour between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPulse {
    red: f32,
    increment: f32,
}

impl ColorPulse {
    pub const STEP: f32 = 0.05;

    pub fn new() -> Self {
        Self {
            red: 0.0,
            increment: Self::STEP,
        }
    }

    pub fn color(&self) -> [f32; 4] {
        [self.red, 0.3, 0.8, 1.0]
    }

    /// Advances one frame. The direction flips once red has left `[0, 1]`.
    pub fn step(&mut self) {
        if self.red > 1.0 {
            self.increment = -Self::STEP;
        } else if self.red < 0.0 {
            self.increment = Self::STEP;
        }
        self.red += self.increment;
    }
}

impl Default for ColorPulse {
    fn default() -> Self {
        Self::new()
    }
}
