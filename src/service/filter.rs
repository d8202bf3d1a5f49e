use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::service::error::IssueError;
use crate::store::{FilterValue, IssueFilter};

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 정확히 `"true"` 일 때만 참이다.
pub fn parse_open(value: &str) -> bool {
    value == "true"
}

/// RFC 3339, 시간대 없는 일시(UTC 로 간주), 날짜만 있으면 UTC 자정.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// 쿼리 파라미터를 동등 비교 필터로 바꾼다.
///
/// `open` 은 불리언으로, 두 시각 필드는 시각으로 바꾸고 나머지 키는 문자열 그대로 둔다.
/// 시각을 해석할 수 없으면 `InvalidFilter` 로 실패한다.
pub fn translate<I>(query: I) -> Result<IssueFilter, IssueError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut filter = IssueFilter::new();

    for (field, raw) in query {
        let value = match field.as_str() {
            "open" => FilterValue::Bool(parse_open(&raw)),
            "created_on" | "updated_on" => match parse_timestamp(&raw) {
                Some(ts) => FilterValue::Timestamp(ts),
                None => return Err(IssueError::InvalidFilter { field, value: raw }),
            },
            _ => FilterValue::Text(raw),
        };
        filter.insert(field, value);
    }

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[rstest]
    #[case("true", true)]
    #[case("false", false)]
    #[case("1", false)]
    #[case("", false)]
    #[case("TRUE", false)]
    #[case("yes please", false)]
    fn open_is_true_only_for_the_literal_true(#[case] raw: &str, #[case] expected: bool) {
        let filter = translate(query(&[("open", raw)])).unwrap();

        assert_eq!(filter.get("open"), Some(&FilterValue::Bool(expected)));
    }

    #[rstest]
    #[case("2024-03-01T10:20:30Z")]
    #[case("2024-03-01T12:20:30+02:00")]
    #[case("2024-03-01T10:20:30")]
    #[case("2024-03-01 10:20:30")]
    fn timestamps_parse_to_utc(#[case] raw: &str) {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 20, 30).unwrap();

        assert_eq!(parse_timestamp(raw), Some(expected));
    }

    #[test]
    fn bare_date_is_utc_midnight() {
        let filter = translate(query(&[("updated_on", "2024-03-01")])).unwrap();

        assert_eq!(
            filter.get("updated_on"),
            Some(&FilterValue::Timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()))
        );
    }

    #[test]
    fn unparsable_date_is_an_invalid_filter() {
        let err = translate(query(&[("created_on", "last tuesday")])).unwrap_err();

        assert_eq!(
            err,
            IssueError::InvalidFilter {
                field: "created_on".into(),
                value: "last tuesday".into(),
            }
        );
    }

    #[test]
    fn other_keys_pass_through_as_text() {
        let filter = translate(query(&[("_id", "abc"), ("whatever", "x"), ("assigned_to", "joe")])).unwrap();

        assert_eq!(filter.len(), 3);
        assert_eq!(filter.get("_id"), Some(&FilterValue::Text("abc".into())));
        assert_eq!(filter.get("whatever"), Some(&FilterValue::Text("x".into())));
    }

    #[test]
    fn empty_query_is_an_empty_filter() {
        assert!(translate(Vec::new()).unwrap().is_empty());
    }
}
