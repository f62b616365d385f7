use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string_len(16)
                            .not_null()
                            .default("user"),
                    )
                    .col(
                        ColumnDef::new(Users::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::EmailVerificationToken).text().null())
                    .col(
                        ColumnDef::new(Users::KycStatus)
                            .string_len(16)
                            .not_null()
                            .default("not_submitted"),
                    )
                    .col(ColumnDef::new(Users::KycStatusMessage).text().null())
                    .col(ColumnDef::new(Users::KycIdDocumentUrl).text().null())
                    .col(
                        ColumnDef::new(Users::KycIdDocumentPublicId)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(Users::KycAddressDocumentUrl).text().null())
                    .col(
                        ColumnDef::new(Users::KycAddressDocumentPublicId)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::KycContactEmail)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(Users::KycContactPhone).string_len(32).null())
                    .col(
                        ColumnDef::new(Users::KycSubmittedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Users::WalletAddress).string_len(64).null())
                    .col(
                        ColumnDef::new(Users::WalletConnected)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::WalletNonce).string_len(64).null())
                    .col(
                        ColumnDef::new(Users::ResetPasswordTokenHash)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::ResetPasswordExpires)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // KYC review queue is scanned by status on every admin listing
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_users_kyc_pending
                ON users (kyc_submitted_at)
                WHERE kyc_status = 'pending';
                "#,
            )
            .await?;

        // Unverified users are re-targeted by the resend-verification flow
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_users_unverified
                ON users (id)
                WHERE is_verified = false;
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_users_created_at
                ON users (created_at DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP INDEX IF EXISTS idx_users_kyc_pending;
                DROP INDEX IF EXISTS idx_users_unverified;
                DROP INDEX IF EXISTS idx_users_created_at;
                "#,
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    Role,
    IsVerified,
    EmailVerificationToken,
    KycStatus,
    KycStatusMessage,
    KycIdDocumentUrl,
    KycIdDocumentPublicId,
    KycAddressDocumentUrl,
    KycAddressDocumentPublicId,
    KycContactEmail,
    KycContactPhone,
    KycSubmittedAt,
    WalletAddress,
    WalletConnected,
    WalletNonce,
    ResetPasswordTokenHash,
    ResetPasswordExpires,
    CreatedAt,
    UpdatedAt,
}
