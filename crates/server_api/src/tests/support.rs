use chrono::{Duration, NaiveDate};
use shared::domain::UNITED_STATES;
use storage::{Dataset, Record};

use crate::ApiContext;

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("date")
}

fn record(state: &str, end_date: NaiveDate, covid: Option<i64>, total: i64) -> Record {
    Record::new(
        state,
        end_date,
        None,
        [covid, Some(total / 10), Some(1), Some(total)],
    )
}

/// Alabama: eight 2020 weeks (the last with a suppressed COVID-19 count) and
/// two 2021 weeks, stored newest first. Alaska: five 2020 weeks. United
/// States: two 2020 weeks.
pub(crate) fn dataset() -> Dataset {
    let mut records = Vec::new();

    let first_week = date(2020, 3, 15);
    for i in (0..8i64).rev() {
        let covid = (i < 7).then_some(10 * (i + 1));
        records.push(record("Alabama", first_week + Duration::weeks(i), covid, 1000 + 10 * i));
    }
    records.push(record("Alabama", date(2021, 1, 17), Some(90), 1100));
    records.push(record("Alabama", date(2021, 1, 10), Some(100), 1200));

    for i in 0..5i64 {
        records.push(record("Alaska", first_week + Duration::weeks(i), Some(i), 50 + i));
    }

    records.push(record(UNITED_STATES, first_week, Some(5000), 60000));
    records.push(record(UNITED_STATES, date(2020, 3, 22), Some(6000), 61000));

    Dataset::from_records(
        vec![
            "State".into(),
            "End Date".into(),
            "COVID-19 Deaths".into(),
            "Pneumonia Deaths".into(),
            "Influenza Deaths".into(),
            "Total Deaths".into(),
        ],
        records,
    )
}

pub(crate) fn context(with_log_measures: bool) -> ApiContext {
    ApiContext::new(dataset(), with_log_measures)
}
