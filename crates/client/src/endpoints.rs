//! Endpoint map for the marketplace REST API.
//!
//! Every call the client makes is named here, with its HTTP method and path.
//! Paths are relative to the configured API origin.

use reqwest::Method;

use fundhub_core::types::DbId;

/// A REST API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    // -- Auth ---------------------------------------------------------------
    Login,
    Logout,
    Signup,
    Me,

    // -- Discovery ----------------------------------------------------------
    Categories,
    CategoryProjects { category_id: DbId },
    SearchProjects,
    ProjectDetail { project_id: DbId },
    ProjectRewards { project_id: DbId },

    // -- Backer: checkout ---------------------------------------------------
    CreateOrder,
    MyOrders,
    OrderDetail { order_id: DbId },
    CancelOrder { order_id: DbId },

    // -- Backer: addresses --------------------------------------------------
    Addresses,
    CreateAddress,
    UpdateAddress { address_id: DbId },
    DeleteAddress { address_id: DbId },
    SetDefaultAddress { address_id: DbId },

    // -- Backer: payment methods --------------------------------------------
    PaymentMethods,
    CreatePaymentMethod,
    DeletePaymentMethod { payment_id: DbId },

    // -- Creator ------------------------------------------------------------
    CreatorProjects,
    CreateProject,
    UpdateProject { project_id: DbId },
    SubmitProject { project_id: DbId },
    SaveRewards { project_id: DbId },
    CreatorProjectBackers { project_id: DbId },

    // -- Admin: moderation --------------------------------------------------
    AdminProjects,
    ApproveProject { project_id: DbId },
    RejectProject { project_id: DbId },
    AdminUsers,
    SuspendUser { user_id: DbId },
    UnsuspendUser { user_id: DbId },

    // -- Notices ------------------------------------------------------------
    Notices,
    NoticeDetail { notice_id: DbId },
    CreateNotice,
    UpdateNotice { notice_id: DbId },
    DeleteNotice { notice_id: DbId },

    // -- Inquiries ----------------------------------------------------------
    MyInquiries,
    CreateInquiry,
    AdminInquiries,
    AnswerInquiry { inquiry_id: DbId },

    // -- Reports ------------------------------------------------------------
    CreateReport,
    AdminReports,
    ResolveReport { report_id: DbId },

    // -- Settlements --------------------------------------------------------
    CreatorSettlements,
    AdminSettlements,
    UpdateSettlementStatus { settlement_id: DbId },

    // -- Notifications ------------------------------------------------------
    Notifications,
    NotificationStream,
    MarkNotificationRead { notification_id: DbId },
    MarkAllNotificationsRead,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        use Endpoint::*;
        match self {
            Login | Logout | Signup | CreateOrder | CreateAddress | CreatePaymentMethod
            | CreateProject | SubmitProject { .. } | CreateNotice | CreateInquiry
            | CreateReport | AnswerInquiry { .. } => Method::POST,

            SaveRewards { .. } | UpdateAddress { .. } | UpdateProject { .. }
            | UpdateNotice { .. } => Method::PUT,

            CancelOrder { .. }
            | SetDefaultAddress { .. }
            | ApproveProject { .. }
            | RejectProject { .. }
            | SuspendUser { .. }
            | UnsuspendUser { .. }
            | ResolveReport { .. }
            | UpdateSettlementStatus { .. }
            | MarkNotificationRead { .. }
            | MarkAllNotificationsRead => Method::PATCH,

            DeleteAddress { .. } | DeletePaymentMethod { .. } | DeleteNotice { .. } => {
                Method::DELETE
            }

            Me | Categories | CategoryProjects { .. } | SearchProjects | ProjectDetail { .. }
            | ProjectRewards { .. } | MyOrders | OrderDetail { .. } | Addresses
            | PaymentMethods | CreatorProjects | CreatorProjectBackers { .. }
            | AdminProjects | AdminUsers | Notices | NoticeDetail { .. } | MyInquiries
            | AdminInquiries | AdminReports | CreatorSettlements | AdminSettlements
            | Notifications | NotificationStream => Method::GET,
        }
    }

    /// Request path, starting with `/api`.
    pub fn path(&self) -> String {
        use Endpoint::*;
        match self {
            Login => "/api/auth/login".into(),
            Logout => "/api/auth/logout".into(),
            Signup => "/api/auth/signup".into(),
            Me => "/api/users/me".into(),

            Categories => "/api/categories".into(),
            CategoryProjects { category_id } => format!("/api/categories/{category_id}/projects"),
            SearchProjects => "/api/projects/search".into(),
            ProjectDetail { project_id } => format!("/api/projects/{project_id}"),
            ProjectRewards { project_id } => format!("/api/projects/{project_id}/rewards"),

            CreateOrder | MyOrders => "/api/orders".into(),
            OrderDetail { order_id } => format!("/api/orders/{order_id}"),
            CancelOrder { order_id } => format!("/api/orders/{order_id}/cancel"),

            Addresses | CreateAddress => "/api/addresses".into(),
            UpdateAddress { address_id } | DeleteAddress { address_id } => {
                format!("/api/addresses/{address_id}")
            }
            SetDefaultAddress { address_id } => format!("/api/addresses/{address_id}/default"),

            PaymentMethods | CreatePaymentMethod => "/api/payments/methods".into(),
            DeletePaymentMethod { payment_id } => format!("/api/payments/methods/{payment_id}"),

            CreatorProjects | CreateProject => "/api/creator/projects".into(),
            UpdateProject { project_id } => format!("/api/creator/projects/{project_id}"),
            SubmitProject { project_id } => format!("/api/creator/projects/{project_id}/submit"),
            SaveRewards { project_id } => format!("/api/creator/projects/{project_id}/rewards"),
            CreatorProjectBackers { project_id } => {
                format!("/api/creator/projects/{project_id}/backers")
            }

            AdminProjects => "/api/admin/projects".into(),
            ApproveProject { project_id } => format!("/api/admin/projects/{project_id}/approve"),
            RejectProject { project_id } => format!("/api/admin/projects/{project_id}/reject"),
            AdminUsers => "/api/admin/users".into(),
            SuspendUser { user_id } => format!("/api/admin/users/{user_id}/suspend"),
            UnsuspendUser { user_id } => format!("/api/admin/users/{user_id}/unsuspend"),

            Notices | CreateNotice => "/api/notices".into(),
            NoticeDetail { notice_id }
            | UpdateNotice { notice_id }
            | DeleteNotice { notice_id } => format!("/api/notices/{notice_id}"),

            MyInquiries | CreateInquiry => "/api/inquiries".into(),
            AdminInquiries => "/api/admin/inquiries".into(),
            AnswerInquiry { inquiry_id } => format!("/api/admin/inquiries/{inquiry_id}/answer"),

            CreateReport => "/api/reports".into(),
            AdminReports => "/api/admin/reports".into(),
            ResolveReport { report_id } => format!("/api/admin/reports/{report_id}/resolve"),

            CreatorSettlements => "/api/creator/settlements".into(),
            AdminSettlements => "/api/admin/settlements".into(),
            UpdateSettlementStatus { settlement_id } => {
                format!("/api/admin/settlements/{settlement_id}/status")
            }

            Notifications => "/api/notifications".into(),
            NotificationStream => "/api/notifications/subscribe".into(),
            MarkNotificationRead { notification_id } => {
                format!("/api/notifications/{notification_id}/read")
            }
            MarkAllNotificationsRead => "/api/notifications/read-all".into(),
        }
    }

    /// Whether a 401 from this endpoint means the session has expired.
    /// Credential endpoints answer 401 for a wrong password instead.
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Endpoint::Login
                | Endpoint::Signup
                | Endpoint::Categories
                | Endpoint::CategoryProjects { .. }
                | Endpoint::SearchProjects
                | Endpoint::ProjectDetail { .. }
                | Endpoint::ProjectRewards { .. }
                | Endpoint::Notices
                | Endpoint::NoticeDetail { .. }
        )
    }

    /// Whether only administrators may call this endpoint.
    pub fn is_admin_only(&self) -> bool {
        self.path().starts_with("/api/admin/") || matches!(
            self,
            Endpoint::CreateNotice | Endpoint::UpdateNotice { .. } | Endpoint::DeleteNotice { .. }
        )
    }
}
