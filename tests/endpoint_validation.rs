//! Parameter validation must reject bad input before any request is
//! attempted. None of these calls touch the network: every one fails at
//! the validation step.

use nasapy::client::{GenelabSearchParams, MarsRoverParams};
use nasapy::ssd::{
    CloseApproachParams, FireballParams, MissionDesignParams, NhatsParams, ScoutParams,
    SentryParams,
};
use nasapy::media::MediaSearchParams;
use nasapy::{ApiDate, Error, Nasa};

fn assert_invalid<T: std::fmt::Debug>(result: nasapy::Result<T>) {
    match result {
        Err(Error::InvalidParameter(_)) => {}
        other => panic!("expected InvalidParameter, got {:?}", other),
    }
}

#[test]
fn malformed_date_fails_at_parse() {
    assert_invalid("2019/01/01".parse::<ApiDate>());
    assert_invalid("yesterday".parse::<ApiDate>());
}

#[test]
fn mars_rover_rejects_sol_and_earth_date_together() {
    let nasa = Nasa::new(None);
    let params = MarsRoverParams {
        sol: Some(1000),
        earth_date: Some("2015-05-30".parse().unwrap()),
        ..MarsRoverParams::default()
    };
    assert_invalid(nasa.mars_rover(&params));
}

#[test]
fn earth_imagery_rejects_out_of_range_coordinates() {
    let nasa = Nasa::new(None);
    assert_invalid(nasa.earth_imagery(95.0, 100.75, None, None, false));
    assert_invalid(nasa.earth_imagery(1.5, -200.0, None, None, false));
}

#[test]
fn earth_assets_rejects_out_of_range_coordinates() {
    let nasa = Nasa::new(None);
    let begin: ApiDate = "2019-01-01".parse().unwrap();
    assert_invalid(nasa.earth_assets(-91.0, 0.0, begin, None));
}

#[test]
fn genelab_rejects_zero_page_size() {
    let nasa = Nasa::new(None);
    let params = GenelabSearchParams {
        term: Some("space".to_string()),
        size: 0,
        ..GenelabSearchParams::default()
    };
    assert_invalid(nasa.genelab_search(&params));
}

#[test]
fn mission_design_requires_exactly_one_selector() {
    assert_invalid(nasapy::ssd::mission_design(&MissionDesignParams::default()));

    let params = MissionDesignParams {
        des: Some("2012 TC4".to_string()),
        sstr: Some("apophis".to_string()),
        ..MissionDesignParams::default()
    };
    assert_invalid(nasapy::ssd::mission_design(&params));
}

#[test]
fn nhats_rejects_values_outside_the_accepted_sets() {
    let params = NhatsParams {
        dv: 3,
        ..NhatsParams::default()
    };
    assert_invalid(nasapy::ssd::nhats(&params));

    let params = NhatsParams {
        stay: 12,
        ..NhatsParams::default()
    };
    assert_invalid(nasapy::ssd::nhats_table(&params));
}

#[test]
fn sentry_rejects_both_object_selectors() {
    let params = SentryParams {
        spk: Some(29_075),
        des: Some("99942".to_string()),
        ..SentryParams::default()
    };
    assert_invalid(nasapy::ssd::sentry(&params));
}

#[test]
fn close_approach_and_fireballs_reject_zero_limit() {
    let params = CloseApproachParams {
        limit: Some(0),
        ..CloseApproachParams::default()
    };
    assert_invalid(nasapy::ssd::close_approach(&params));

    let params = FireballParams {
        limit: Some(0),
        ..FireballParams::default()
    };
    assert_invalid(nasapy::ssd::fireballs(&params));
}

#[test]
fn scout_rejects_orbit_count_out_of_bounds() {
    let params = ScoutParams {
        n_orbits: Some(1001),
        ..ScoutParams::default()
    };
    assert_invalid(nasapy::ssd::scout(&params));
}

#[test]
fn media_search_requires_a_criterion() {
    assert_invalid(nasapy::media::media_search(&MediaSearchParams::default()));
}
