//! Test data builders for creating test objects

use vizprep::{DataFrame, Field, FieldType};

/// Builder for creating test DataFrames
pub struct FrameBuilder {
    length: Option<usize>,
    fields: Vec<Field>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self {
            length: None,
            fields: Vec::new(),
        }
    }

    /// Override the declared length (defaults to the first field's length)
    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn time(mut self, name: &str, values: &[f64]) -> Self {
        self.fields
            .push(Field::new(name, FieldType::Time, values.to_vec()));
        self
    }

    pub fn number(mut self, name: &str, values: &[f64]) -> Self {
        self.fields
            .push(Field::new(name, FieldType::Number, values.to_vec()));
        self
    }

    pub fn build(self) -> DataFrame {
        match self.length {
            Some(length) => DataFrame::new(length, self.fields),
            None => DataFrame::from_fields(self.fields),
        }
    }
}

/// The sample panel frame: Time plus one Value column
pub fn sample_frame() -> DataFrame {
    FrameBuilder::new()
        .time("Time", &[1.0, 2.0, 3.0, 7.0, 9.0])
        .number("Value", &[0.0, 10.0, 35.0, 20.0, 25.0])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_builder() {
        let frame = FrameBuilder::new()
            .time("Time", &[1.0, 2.0])
            .number("Value", &[3.0, 4.0])
            .build();

        assert_eq!(frame.length, 2);
        assert_eq!(frame.fields.len(), 2);
        assert_eq!(frame.fields[0].field_type, FieldType::Time);
    }
}
