mod support;

use cohere::application::solver::project_simplex;
use cohere::application::trade::{
    lmsr_prices, plan, position_size, trade_cost, trading_direction,
};
use cohere::domain::Side;
use cohere::error::{Error, ProjectionError};
use rust_decimal_macros::dec;

use support::{assert_close, assert_vec_close, OVERPRICED};

#[test]
fn overpriced_market_is_sold_on_every_outcome() {
    let projection = project_simplex(&OVERPRICED).unwrap();
    let direction = trading_direction(&projection.mu, &OVERPRICED).unwrap();

    for d in &direction {
        assert_close(*d, -(1.1_f64.ln()), 1e-12);
    }
}

#[test]
fn position_sizes_scale_the_direction() {
    let projection = project_simplex(&OVERPRICED).unwrap();
    let direction = trading_direction(&projection.mu, &OVERPRICED).unwrap();
    let sizes = position_size(&projection.mu, &OVERPRICED, 100.0).unwrap();

    for (s, d) in sizes.iter().zip(&direction) {
        assert_close(*s, 100.0 * d, 1e-12);
    }
}

#[test]
fn executing_the_plan_moves_prices_to_the_projection() {
    let b = 100.0;
    let projection = project_simplex(&OVERPRICED).unwrap();
    let sizes = position_size(&projection.mu, &OVERPRICED, b).unwrap();

    let q: Vec<f64> = OVERPRICED.iter().map(|t| b * t.ln()).collect();
    let after: Vec<f64> = q.iter().zip(&sizes).map(|(qi, s)| qi + s).collect();
    assert_vec_close(&lmsr_prices(&after, b).unwrap(), &projection.mu, 1e-12);

    // C(b ln mu*) - C(b ln theta) = b ln(1) - b ln(1.1)
    let cost = trade_cost(&OVERPRICED, &sizes, b).unwrap();
    assert_close(cost, -b * 1.1_f64.ln(), 1e-9);
}

#[test]
fn plan_rounds_and_labels_legs() {
    let projection = project_simplex(&OVERPRICED).unwrap();
    let plan = plan(&projection.mu, &OVERPRICED, 100.0, dec!(0.01)).unwrap();

    assert_eq!(plan.legs().len(), 3);
    assert!(plan.legs().iter().all(|leg| leg.side == Side::Sell));
    // 100 * ln(1.1) = 9.531...
    assert!(plan.legs().iter().all(|leg| leg.shares == dec!(9.53)));
    assert_eq!(plan.shares_sold(), dec!(28.59));
    assert_eq!(plan.shares_bought(), dec!(0));
}

#[test]
fn plan_drops_legs_below_minimum() {
    let plan = plan(&[0.30, 0.701], &[0.30, 0.70], 10.0, dec!(0.5)).unwrap();
    assert!(plan.is_empty());
}

#[test]
fn mixed_plan_buys_and_sells() {
    let plan = plan(&[0.3, 0.7], &[0.4, 0.6], 50.0, dec!(0.01)).unwrap();

    assert_eq!(plan.leg(0).unwrap().side, Side::Sell);
    assert_eq!(plan.leg(1).unwrap().side, Side::Buy);
    // 50 * ln(0.7 / 0.6) = 7.707...
    assert_eq!(plan.leg(1).unwrap().shares, dec!(7.71));
}

#[test]
fn non_positive_liquidity_is_rejected() {
    let err = position_size(&[0.5, 0.5], &[0.4, 0.6], -1.0).unwrap_err();
    assert!(matches!(
        err,
        Error::Projection(ProjectionError::InvalidLiquidity(_))
    ));
}

#[test]
fn mismatched_vectors_are_rejected() {
    assert!(trading_direction(&[0.5], &[0.5, 0.5]).is_err());
}
