use sqlx::PgPool;
use tracing::instrument;

use crate::modules::reviews::model::{CreateReviewDto, TeacherReview};
use crate::modules::teachers::service::TeacherService;
use crate::utils::errors::AppError;

const REVIEW_COLUMNS: &str =
    "id, teacher_id, reviewed_by_id, teaching_quality, punctuality, \
     student_engagement, overall_rating, comments, review_date";

pub struct ReviewService;

impl ReviewService {
    /// The overall rating is the mean of whichever criteria were supplied,
    /// rounded to two decimals; a review with no ratings stores null.
    #[instrument(skip(db, dto))]
    pub async fn create_review(
        db: &PgPool,
        reviewed_by_id: i32,
        dto: CreateReviewDto,
    ) -> Result<TeacherReview, AppError> {
        TeacherService::get_teacher(db, dto.teacher_id).await?;

        let overall = overall_rating(&[
            dto.teaching_quality,
            dto.punctuality,
            dto.student_engagement,
        ]);

        let review = sqlx::query_as::<_, TeacherReview>(&format!(
            "INSERT INTO teacher_reviews
                 (teacher_id, reviewed_by_id, teaching_quality, punctuality,
                  student_engagement, overall_rating, comments)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(dto.teacher_id)
        .bind(reviewed_by_id)
        .bind(dto.teaching_quality)
        .bind(dto.punctuality)
        .bind(dto.student_engagement)
        .bind(overall)
        .bind(&dto.comments)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(review)
    }

    #[instrument(skip(db))]
    pub async fn list_reviews(
        db: &PgPool,
        teacher_id: Option<i32>,
    ) -> Result<Vec<TeacherReview>, AppError> {
        match teacher_id {
            Some(teacher_id) => sqlx::query_as::<_, TeacherReview>(&format!(
                "SELECT {REVIEW_COLUMNS} FROM teacher_reviews
                 WHERE teacher_id = $1 ORDER BY review_date DESC"
            ))
            .bind(teacher_id)
            .fetch_all(db)
            .await
            .map_err(AppError::database),
            None => sqlx::query_as::<_, TeacherReview>(&format!(
                "SELECT {REVIEW_COLUMNS} FROM teacher_reviews ORDER BY review_date DESC"
            ))
            .fetch_all(db)
            .await
            .map_err(AppError::database),
        }
    }

    #[instrument(skip(db))]
    pub async fn get_review(db: &PgPool, id: i32) -> Result<TeacherReview, AppError> {
        sqlx::query_as::<_, TeacherReview>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM teacher_reviews WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Review not found"))
    }

    #[instrument(skip(db))]
    pub async fn delete_review(db: &PgPool, id: i32) -> Result<(), AppError> {
        Self::get_review(db, id).await?;

        sqlx::query("DELETE FROM teacher_reviews WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        Ok(())
    }
}

fn overall_rating(ratings: &[Option<i32>]) -> Option<f64> {
    let supplied: Vec<i32> = ratings.iter().flatten().copied().collect();
    if supplied.is_empty() {
        return None;
    }
    let mean = supplied.iter().sum::<i32>() as f64 / supplied.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_is_mean_of_supplied_ratings() {
        assert_eq!(overall_rating(&[Some(4), Some(5), Some(3)]), Some(4.0));
        assert_eq!(overall_rating(&[Some(4), Some(5), None]), Some(4.5));
    }

    #[test]
    fn overall_rounds_to_two_decimals() {
        assert_eq!(overall_rating(&[Some(4), Some(4), Some(5)]), Some(4.33));
    }

    #[test]
    fn no_ratings_means_no_overall() {
        assert_eq!(overall_rating(&[None, None, None]), None);
    }
}
