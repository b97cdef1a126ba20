pub mod health;
pub mod mock_interview;
