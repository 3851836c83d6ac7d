//! Elasticity configuration - price-change buckets and adjustment thresholds.

mod config;
mod defaults;

pub use config::{
    ChurnAdjustment, ElasticityConfig, GoalProfile, PriceChangeBucket, PricingGoal,
    RiskThresholds, ScenarioBand, ScenarioLevel,
};
