//! Integer coercion for columns the schema declares as whole numbers.

use crate::error::{AnalysisError, Result};
use crate::utils::{clean_numeric_string, is_error_marker, is_integer_dtype};
use polars::prelude::*;

const TARGET: &str = "integer";

/// Coerce a series to `Int64`.
///
/// Integer sources pass through, floats truncate their fractional part, and
/// strings are parsed after stripping numeric formatting. Any value that
/// cannot be represented as an integer — including missing values — is a
/// fatal coercion error.
pub(crate) fn coerce_to_integer(series: &Series) -> Result<Series> {
    let name = series.name().to_string();

    if series.null_count() > 0 {
        return Err(AnalysisError::coercion(
            &name,
            TARGET,
            "column contains missing values",
        ));
    }

    let dtype = series.dtype();
    if is_integer_dtype(dtype) {
        return Ok(series.cast(&DataType::Int64)?);
    }

    match dtype {
        DataType::Float32 | DataType::Float64 => {
            let float_series = series.cast(&DataType::Float64)?;
            let ca = float_series.f64()?;
            let mut values: Vec<i64> = Vec::with_capacity(ca.len());

            for opt_val in ca.into_iter() {
                match opt_val {
                    Some(val) if val.is_finite() => values.push(val as i64),
                    Some(val) => {
                        return Err(AnalysisError::coercion(
                            &name,
                            TARGET,
                            format!("value {} is not finite", val),
                        ));
                    }
                    None => {
                        return Err(AnalysisError::coercion(
                            &name,
                            TARGET,
                            "column contains missing values",
                        ));
                    }
                }
            }

            Ok(Series::new(series.name().clone(), values))
        }
        DataType::String => {
            let ca = series.str()?;
            let mut values: Vec<i64> = Vec::with_capacity(ca.len());

            for opt_val in ca.into_iter() {
                let Some(val) = opt_val else {
                    return Err(AnalysisError::coercion(
                        &name,
                        TARGET,
                        "column contains missing values",
                    ));
                };

                let trimmed = val.trim();
                if trimmed.is_empty() || is_error_marker(trimmed) {
                    return Err(AnalysisError::coercion(
                        &name,
                        TARGET,
                        format!("value '{}' marks a missing entry", val),
                    ));
                }

                let cleaned = clean_numeric_string(trimmed);
                match cleaned.parse::<i64>() {
                    Ok(parsed) => values.push(parsed),
                    Err(_) => {
                        return Err(AnalysisError::coercion(
                            &name,
                            TARGET,
                            format!("value '{}' is not an integer", val),
                        ));
                    }
                }
            }

            Ok(Series::new(series.name().clone(), values))
        }
        other => Err(AnalysisError::coercion(
            &name,
            TARGET,
            format!("unsupported source type {:?}", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_string_years() {
        let series = Series::new("year".into(), &["2019", "2020", "2021"]);
        let coerced = coerce_to_integer(&series).unwrap();

        assert_eq!(coerced.dtype(), &DataType::Int64);
        let values: Vec<i64> = coerced.i64().unwrap().into_no_null_iter().collect();
        assert_eq!(values, vec![2019, 2020, 2021]);
    }

    #[test]
    fn test_coerce_integer_passthrough() {
        let series = Series::new("year".into(), &[2019i32, 2020]);
        let coerced = coerce_to_integer(&series).unwrap();
        assert_eq!(coerced.dtype(), &DataType::Int64);
    }

    #[test]
    fn test_coerce_float_truncates() {
        let series = Series::new("year".into(), &[2019.0f64, 2020.0]);
        let coerced = coerce_to_integer(&series).unwrap();

        let values: Vec<i64> = coerced.i64().unwrap().into_no_null_iter().collect();
        assert_eq!(values, vec![2019, 2020]);
    }

    #[test]
    fn test_coerce_rejects_non_numeric_text() {
        let series = Series::new("year".into(), &["2019", "not-a-year"]);
        let err = coerce_to_integer(&series).unwrap_err();

        assert!(matches!(err, AnalysisError::TypeCoercion { .. }));
        assert!(err.to_string().contains("not-a-year"));
    }

    #[test]
    fn test_coerce_rejects_missing_values() {
        let series = Series::new("year".into(), &[Some(2019i64), None]);
        let err = coerce_to_integer(&series).unwrap_err();
        assert!(matches!(err, AnalysisError::TypeCoercion { .. }));
    }

    #[test]
    fn test_coerce_rejects_error_markers() {
        let series = Series::new("year".into(), &["2019", "N/A"]);
        let err = coerce_to_integer(&series).unwrap_err();
        assert!(matches!(err, AnalysisError::TypeCoercion { .. }));
    }

    #[test]
    fn test_coerce_handles_formatted_numbers() {
        let series = Series::new("year".into(), &[" 2,019 ", "2020"]);
        let coerced = coerce_to_integer(&series).unwrap();

        let values: Vec<i64> = coerced.i64().unwrap().into_no_null_iter().collect();
        assert_eq!(values, vec![2019, 2020]);
    }
}
