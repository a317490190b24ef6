use crate::domain::course::Course;
use crate::error::{EnrollmentError, Result};
use std::io::Read;

/// Reads the course catalog from a CSV source.
///
/// Expects the header `id,title,base_price,list_price`. Whitespace around
/// fields is trimmed; each row is validated as it is read.
pub struct CourseReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CourseReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes and validates courses, one `Result` per row.
    pub fn courses(self) -> impl Iterator<Item = Result<Course>> {
        self.reader.into_deserialize().map(|result| {
            let course: Course = result.map_err(EnrollmentError::from)?;
            course.validate()?;
            Ok(course)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "id, title, base_price, list_price\n\
                    web-dev, Full-Stack Web Development, 299, 399\n\
                    ds-101, Data Science, 149.50, 149.50";
        let results: Vec<Result<Course>> = CourseReader::new(data.as_bytes()).courses().collect();

        assert_eq!(results.len(), 2);
        let web = results[0].as_ref().unwrap();
        assert_eq!(web.id, "web-dev");
        assert_eq!(web.base_price, Money::new(dec!(299)).unwrap());
        assert_eq!(results[1].as_ref().unwrap().list_price, Money::new(dec!(149.50)).unwrap());
    }

    #[test]
    fn test_reader_rejects_negative_price() {
        let data = "id,title,base_price,list_price\nbad,Bad,-1,10";
        let results: Vec<Result<Course>> = CourseReader::new(data.as_bytes()).courses().collect();
        assert!(matches!(results[0], Err(EnrollmentError::CsvError(_))));
    }

    #[test]
    fn test_reader_rejects_inverted_prices() {
        let data = "id,title,base_price,list_price\nbad,Bad,20,10\nok,Ok,10,20";
        let results: Vec<Result<Course>> = CourseReader::new(data.as_bytes()).courses().collect();
        assert!(matches!(results[0], Err(EnrollmentError::InvalidInput(_))));
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_reader_keeps_full_precision() {
        let data = "id,title,base_price,list_price\n\
                    big,Big,12345678901234567.89,12345678901234567.99";
        let results: Vec<Result<Course>> = CourseReader::new(data.as_bytes()).courses().collect();
        let course = results[0].as_ref().unwrap();
        assert_eq!(course.base_price.value(), dec!(12345678901234567.89));
        assert_eq!(course.list_price.value(), dec!(12345678901234567.99));
    }

    #[test]
    fn test_reader_rejects_malformed_price() {
        let data = "id,title,base_price,list_price\nbad,Bad,12.x,20";
        let results: Vec<Result<Course>> = CourseReader::new(data.as_bytes()).courses().collect();
        assert!(matches!(results[0], Err(EnrollmentError::CsvError(_))));
    }
}
