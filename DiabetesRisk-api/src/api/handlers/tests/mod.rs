mod health_test;
mod support;
mod wizard_test;
