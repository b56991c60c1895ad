use server_api::ApiContext;
use storage::Dataset;

use crate::app_state::AppState;

/// Alabama has six 2020 weeks (enough for a scatter matrix); Alaska has two.
pub(crate) const FIXTURE_CSV: &str = "\
State,End Date,Year,COVID-19 Deaths,Pneumonia Deaths,Influenza Deaths,Total Deaths
Alabama,03/15/2020,2019/2020,10,80,3,1030
Alabama,03/22/2020,2019/2020,25,75,1,1010
Alabama,03/29/2020,2019/2020,40,90,,1100
Alabama,04/05/2020,2019/2020,55,95,0,1150
Alabama,04/12/2020,2019/2020,,70,2,990
Alabama,04/19/2020,2019/2020,80,88,1,1200
Alaska,03/15/2020,2019/2020,0,4,0,60
Alaska,03/22/2020,2019/2020,1,5,0,61
United States,03/15/2020,2019/2020,5000,9000,400,58000
";

pub(crate) fn dataset() -> Dataset {
    Dataset::from_reader(FIXTURE_CSV.as_bytes()).expect("fixture dataset")
}

pub(crate) fn state() -> AppState {
    AppState::new(ApiContext::new(dataset(), false))
}
