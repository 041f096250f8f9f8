//! Spring state and the fixed-step RK4 solver
//!
//! A `PhysicsState` is a plain position/velocity pair. The integrator keeps
//! several of them (current, previous, working) and advances them with
//! `PhysicsState::integrate`, which performs one Runge-Kutta 4 step of the
//! damped harmonic oscillator:
//!
//! a = tension * (target - x) - friction * v

/// 1D spring state tracking position and velocity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhysicsState {
    pub position: f64,
    pub velocity: f64,
}

/// Force law parameters sampled by the solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringForce {
    pub tension: f64,
    pub friction: f64,
    pub target: f64,
}

/// Time derivative of a `PhysicsState`
#[derive(Debug, Clone, Copy)]
struct Derivative {
    velocity: f64,
    acceleration: f64,
}

impl SpringForce {
    /// Acceleration at the given position and velocity
    #[inline]
    pub fn acceleration(&self, position: f64, velocity: f64) -> f64 {
        self.tension * (self.target - position) - self.friction * velocity
    }

    #[inline]
    fn derivative(&self, state: &PhysicsState) -> Derivative {
        Derivative {
            velocity: state.velocity,
            acceleration: self.acceleration(state.position, state.velocity),
        }
    }
}

impl PhysicsState {
    /// Create a new state at the given position with zero velocity
    pub fn at_rest(position: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
        }
    }

    /// Euler-project this state along `derivative` by `dt` seconds
    #[inline]
    fn project(&self, derivative: &Derivative, dt: f64) -> Self {
        Self {
            position: self.position + derivative.velocity * dt,
            velocity: self.velocity + derivative.acceleration * dt,
        }
    }

    /// Advance this state by one RK4 step of `h` seconds.
    ///
    /// The four derivative samples are taken at t, t + h/2, t + h/2 and t + h,
    /// each one projected from the previous sample. `working` receives the
    /// last intermediate state evaluated by the solver.
    pub fn integrate(&mut self, working: &mut PhysicsState, force: &SpringForce, h: f64) {
        let a = force.derivative(self);

        *working = self.project(&a, h * 0.5);
        let b = force.derivative(working);

        *working = self.project(&b, h * 0.5);
        let c = force.derivative(working);

        *working = self.project(&c, h);
        let d = force.derivative(working);

        let dxdt = (a.velocity + 2.0 * (b.velocity + c.velocity) + d.velocity) / 6.0;
        let dvdt =
            (a.acceleration + 2.0 * (b.acceleration + c.acceleration) + d.acceleration) / 6.0;

        self.position += dxdt * h;
        self.velocity += dvdt * h;
    }

    /// Linear blend between `previous` (alpha = 0) and `self` (alpha = 1)
    pub fn interpolate(&self, previous: &PhysicsState, alpha: f64) -> Self {
        Self {
            position: self.position * alpha + previous.position * (1.0 - alpha),
            velocity: self.velocity * alpha + previous.velocity * (1.0 - alpha),
        }
    }

    /// Distance between this state's position and `target`
    pub fn displacement_from(&self, target: f64) -> f64 {
        (target - self.position).abs()
    }
}
