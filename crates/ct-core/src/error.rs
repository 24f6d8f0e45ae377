use thiserror::Error;

/// Data access errors
#[derive(Debug, Error)]
pub enum DataError {
    /// Dataset file could not be opened
    #[error("Failed to open dataset '{path}': {source}")]
    Open {
        /// Path that was attempted
        path: String,
        /// Underlying NetCDF error
        #[source]
        source: netcdf::Error,
    },

    /// Named variable absent from the dataset
    #[error("Variable '{0}' not found in dataset")]
    VariableNotFound(String),

    /// Coordinate axis absent from the dataset
    #[error("Coordinate axis '{0}' not found in dataset")]
    AxisNotFound(String),

    /// Reading a variable or attribute failed
    #[error("Failed to read '{name}': {source}")]
    Read {
        /// Variable or attribute name
        name: String,
        /// Underlying NetCDF error
        #[source]
        source: netcdf::Error,
    },

    /// Time axis could not be decoded to calendar dates
    #[error("Cannot decode time axis: {0}")]
    TimeDecode(String),

    /// Coordinate axis is not a 1-D variable
    #[error("Axis '{0}' is not one-dimensional")]
    AxisShape(String),

    /// Coordinate axis holds no values
    #[error("Axis '{0}' is empty")]
    EmptyAxis(String),

    /// Variable shape does not match its coordinate axes
    #[error("Variable '{name}' has shape {actual:?}, expected {expected:?} (time, lat, lon)")]
    UnexpectedShape {
        /// Variable name
        name: String,
        /// Shape implied by the coordinate axes
        expected: Vec<usize>,
        /// Shape found in the file
        actual: Vec<usize>,
    },

    /// Month/year filtering removed every observation
    #[error("No observations for month {month} in years {start}..={end}")]
    EmptySelection {
        /// Requested calendar month (1-12)
        month: u32,
        /// Start of the requested year range
        start: i32,
        /// End of the requested year range
        end: i32,
    },

    /// Two observations fell in the same year
    #[error("Duplicate year {0} in extracted series")]
    DuplicateYear(i32),

    /// Configuration rejected at startup
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
