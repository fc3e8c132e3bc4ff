use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::route::health,
        routes::auth::route::register_teacher,
        routes::auth::route::login,
        routes::auth::route::me,
        routes::students::route::create_student,
        routes::students::route::list_students,
        routes::students::route::my_profile,
        routes::students::route::get_student,
        routes::students::route::update_student,
        routes::students::route::delete_student,
        routes::grades::route::record_grade,
        routes::grades::route::student_grades,
        routes::grades::route::correct_grade,
        routes::grades::route::delete_grade,
        routes::grades::route::class_averages,
        routes::classes::route::create_class,
        routes::classes::route::list_classes,
        routes::classes::route::update_class,
        routes::classes::route::assign_student,
        routes::subjects::route::create_subject,
        routes::subjects::route::list_subjects,
        routes::subjects::route::update_subject,
        routes::subjects::route::delete_subject,
        routes::parents::route::create_parent,
        routes::parents::route::list_parents,
        routes::parents::route::get_parent_profile,
        routes::parents::route::my_children,
        routes::parents::route::child_grades,
        routes::dashboard::route::teacher_dashboard,
        routes::dashboard::route::student_dashboard,
        routes::dashboard::route::parent_dashboard,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Registration, login and session"),
        (name = "Students", description = "Student management"),
        (name = "Grades", description = "Grade recording and reporting"),
        (name = "Classes", description = "Class management"),
        (name = "Subjects", description = "Subject catalogue"),
        (name = "Parents", description = "Parent management and parent reads"),
        (name = "Dashboard", description = "Per-role dashboards")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
