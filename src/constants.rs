//! Application-wide constants and default values
//!
//! Centralized location for all hard-coded values to improve maintainability

/// Expression generation constants
pub mod codegen {
    /// Coefficients with a smaller magnitude are dropped from expanded expressions
    pub const COEFF_EPSILON: f64 = 1e-9;

    /// Decimal places used for every numeric literal in generated code
    pub const LITERAL_PRECISION: usize = 6;

    /// Synthetic column holding a chained sub-model's prediction
    pub const SUB_MODEL_COLUMN: &str = "_poly_pred";

    /// Prefix of locals holding chained sub-model predictions in emitted code
    pub const LOCAL_PREFIX: &str = "_sub";

    /// Text returned by a code generator with nothing connected
    pub const EMPTY_MESSAGE: &str = "// Connect model(s) to generate code";

    /// NetworkTables table name used by generated clients
    pub const NT_TABLE: &str = "FlibberGen";

    /// Generated Java package and class
    pub const JAVA_PACKAGE: &str = "frc.robot.generated";
    pub const JAVA_CLASS: &str = "FlibberModel";
}

/// Node catalog limits
pub mod node {
    /// Model inputs on a code generator node
    pub const CODE_GENERATOR_INPUTS: usize = 4;

    /// Allowed polynomial degree range
    pub const MIN_DEGREE: u32 = 1;
    pub const MAX_DEGREE: u32 = 5;

    /// Allowed neural network iteration range
    pub const MIN_ITERATIONS: u32 = 100;
    pub const MAX_ITERATIONS: u32 = 10_000;
}

/// Plot sampling
pub mod plot {
    /// Points on a fitted curve
    pub const CURVE_SAMPLES: usize = 100;

    /// X range used when no dataset is connected
    pub const DEFAULT_RANGE: (f64, f64) = (0.0, 10.0);
}

/// Status line formatting
pub mod status {
    /// Characters of an error message kept in a node status line
    pub const ERROR_TRUNCATE_CHARS: usize = 20;
}

/// Socket layout on the canvas
pub mod layout {
    pub const HEADER_HEIGHT: f32 = 24.0;
    pub const FIRST_SOCKET_OFFSET: f32 = 20.0;
    pub const SOCKET_SPACING: f32 = 22.0;
    pub const NODE_WIDTH: f32 = 180.0;
    pub const SOCKET_RADIUS: f32 = 6.0;
}
