pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// CSS `cubic-bezier(x1, y1, x2, y2)` timing function. The end points are
/// fixed at (0, 0) and (1, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierEasing {
    cx: f64,
    bx: f64,
    ax: f64,
    cy: f64,
    by: f64,
    ay: f64,
}

impl CubicBezierEasing {
    const NEWTON_ITERATIONS: usize = 8;
    const EPSILON: f64 = 1e-7;

    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        Self {
            cx,
            bx,
            ax: 1.0 - cx - bx,
            cy,
            by,
            ay: 1.0 - cy - by,
        }
    }

    pub fn from_points(points: [f64; 4]) -> Self {
        Self::new(points[0], points[1], points[2], points[3])
    }

    fn sample_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    // Curve parameter whose x equals `x`. x(t) is monotonic for x1, x2 in [0, 1].
    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..Self::NEWTON_ITERATIONS {
            let err = self.sample_x(t) - x;
            if err.abs() < Self::EPSILON {
                return t;
            }
            let d = self.sample_dx(t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while lo < hi {
            let sx = self.sample_x(t);
            if (sx - x).abs() < Self::EPSILON {
                break;
            }
            if x > sx {
                lo = t;
            } else {
                hi = t;
            }
            let next = (lo + hi) * 0.5;
            if next == t {
                break;
            }
            t = next;
        }
        t
    }

    /// Eased output for an input fraction; inputs outside [0, 1] are clamped.
    pub fn apply(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        self.sample_y(self.solve_t(x))
    }
}

/// Wall-clock span measured in milliseconds from an explicit start time.
#[derive(Debug, Clone)]
pub struct Timeline {
    pub start_ms: u64,
    pub duration_ms: u64,
    pub current_ms: u64,
}

impl Timeline {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            start_ms: 0,
            duration_ms,
            current_ms: 0,
        }
    }

    pub fn start(&mut self, now_ms: u64) {
        self.start_ms = now_ms;
        self.current_ms = now_ms;
    }

    pub fn update(&mut self, now_ms: u64) {
        self.current_ms = now_ms;
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.current_ms.saturating_sub(self.start_ms)
    }

    pub fn progress(&self) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms() as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed_ms() >= self.duration_ms
    }

    pub fn eased_progress(&self, easing: &CubicBezierEasing) -> f64 {
        easing.apply(self.progress())
    }
}
