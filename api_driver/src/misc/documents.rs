/// The three documents a driver uploads at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    ProfilePicture,
    VehicleFrontPicture,
    LicenseCertificatePicture,
}

impl DocumentKind {
    /// Upload order.
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::ProfilePicture,
        DocumentKind::VehicleFrontPicture,
        DocumentKind::LicenseCertificatePicture,
    ];

    /// Multipart field carrying the document.
    pub fn field_name(&self) -> &'static str {
        match self {
            DocumentKind::ProfilePicture => "profilePicture",
            DocumentKind::VehicleFrontPicture => "vehicleFrontPicture",
            DocumentKind::LicenseCertificatePicture => "licenseCertificatePicture",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.field_name() == name)
    }

    /// Storage folder below `{root}/drivers`.
    fn folder(&self) -> &'static str {
        match self {
            DocumentKind::ProfilePicture => "profilePictures",
            DocumentKind::VehicleFrontPicture => "vehicleFrontPictures",
            DocumentKind::LicenseCertificatePicture => "licenseCertificatePictures",
        }
    }

    pub fn folder_path(&self, root: &str) -> String {
        format!("{}/drivers/{}", root.trim_end_matches('/'), self.folder())
    }
}
