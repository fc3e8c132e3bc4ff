pub mod class_repository;
pub mod grade_repository;
pub mod parent_repository;
pub mod student_repository;
pub mod subject_repository;
pub mod teacher_repository;
pub mod user_repository;

pub use class_repository::{ClassRepository, ClassUpdate};
pub use grade_repository::{GradeRepository, NewGrade};
pub use parent_repository::ParentRepository;
pub use student_repository::{StudentRepository, StudentUpdate};
pub use subject_repository::SubjectRepository;
pub use teacher_repository::TeacherRepository;
pub use user_repository::UserRepository;
