use super::*;
use crate::test_helpers::{company_user, student_user};

#[test]
fn dashboard_route_per_role() {
    assert_eq!(Role::Student.dashboard_route(), "/dashboard/student");
    assert_eq!(Role::Company.dashboard_route(), "/dashboard/company");
}

#[test]
fn dashboard_route_without_user_is_home() {
    assert_eq!(dashboard_route(None), "/");
    assert_eq!(dashboard_route(Some(&company_user("u", "e@x.y"))), COMPANY_DASHBOARD_ROUTE);
}

#[test]
fn welcome_message_uses_display_name() {
    assert_eq!(welcome_message(None), "Welcome!");
    assert_eq!(welcome_message(Some(&student_user("u", "e@x.y"))), "Welcome back, Ada!");
    assert_eq!(welcome_message(Some(&company_user("u", "e@x.y"))), "Welcome back, Acme!");
}

#[test]
fn required_role_matches_whole_segments() {
    assert_eq!(required_role("/dashboard/student"), Some(Role::Student));
    assert_eq!(required_role("/dashboard/student/settings"), Some(Role::Student));
    assert_eq!(required_role("/dashboard/company?tab=projects"), Some(Role::Company));
    assert_eq!(required_role("/dashboard/students"), None);
    assert_eq!(required_role("/dashboard"), None);
    assert_eq!(required_role("/"), None);
}

#[test]
fn authorization_requires_exact_role() {
    let student = student_user("u", "e@x.y");
    let company = company_user("u", "e@x.y");
    assert!(is_authorized_for_route(Some(&student), "/dashboard/student"));
    assert!(!is_authorized_for_route(Some(&student), "/dashboard/company"));
    assert!(is_authorized_for_route(Some(&company), "/dashboard/company/projects"));
    assert!(!is_authorized_for_route(Some(&company), "/dashboard/student"));
}

#[test]
fn unknown_route_or_missing_user_is_not_authorized() {
    let student = student_user("u", "e@x.y");
    assert!(!is_authorized_for_route(Some(&student), "/settings"));
    assert!(!is_authorized_for_route(None, "/dashboard/student"));
    assert!(!is_authorized_for_route(None, "/"));
}
