mod domain_tests;
mod factory_tests;
mod property_distribution_tests;
