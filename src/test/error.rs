#[cfg(test)]
mod tests {
    use rocket::http::Status;

    use crate::error::AppError;

    #[test]
    fn test_client_errors_map_to_4xx() {
        let cases = [
            (AppError::InvalidInput("bad".to_string()), Status::BadRequest),
            (AppError::InvalidDepartment("XYZ".to_string()), Status::BadRequest),
            (AppError::UserNotFound("nobody".to_string()), Status::Unauthorized),
            (AppError::InvalidCredentials, Status::Unauthorized),
            (AppError::DuplicateUser("alice".to_string()), Status::Conflict),
        ];

        for (err, expected) in cases {
            assert!(!err.is_server_error(), "{} should be a client error", err);
            assert_eq!(Status::from(err), expected);
        }
    }

    #[test]
    fn test_store_failures_map_to_500() {
        let err = AppError::QueryFailed(sqlx::Error::RowNotFound);
        assert!(err.is_server_error());
        assert_eq!(err.status_code(), Status::InternalServerError);

        let err = AppError::Internal("value count mismatch".to_string());
        assert_eq!(Status::from(err), Status::InternalServerError);
    }

    #[test]
    fn test_department_resolution_goes_through_id_lookup() {
        use crate::department::Department;

        assert_eq!(Department::resolve("ISE").ok(), Some(Department::Ise));
        match Department::resolve("ise") {
            Err(err @ AppError::InvalidDepartment(_)) => {
                assert_eq!(err.to_string(), "Invalid department: ise");
                assert_eq!(err.status_code(), Status::BadRequest);
            }
            other => panic!("Expected InvalidDepartment, got {:?}", other),
        }
    }
}
