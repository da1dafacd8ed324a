pub mod seeder;
pub mod session;
