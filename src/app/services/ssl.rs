use crate::app::services::{not_implemented_response, require};
use crate::core::client::{CallOptions, NamecheapClient};
use crate::core::response::ApiResponse;
use crate::domain::model::RequestParams;
use crate::domain::ports::Transport;

const CREATE: &str = "namecheap.ssl.create";
const GET_LIST: &str = "namecheap.ssl.getList";
const PARSE_CSR: &str = "namecheap.ssl.parseCSR";
const GET_APPROVER_EMAIL_LIST: &str = "namecheap.ssl.getApproverEmailList";
const ACTIVATE: &str = "namecheap.ssl.activate";
const RESEND_APPROVER_EMAIL: &str = "namecheap.ssl.resendApproverEmail";
const GET_INFO: &str = "namecheap.ssl.getInfo";
const RENEW: &str = "namecheap.ssl.renew";
const REISSUE: &str = "namecheap.ssl.reissue";
const RESEND_FULFILLMENT_EMAIL: &str = "namecheap.ssl.resendfulfillmentemail";
const PURCHASE_MORE_SANS: &str = "namecheap.ssl.purchasemoresans";
const REVOKE_CERTIFICATE: &str = "namecheap.ssl.revokecertificate";
const EDIT_DCV_METHOD: &str = "namecheap.ssl.editDCVMethod";

pub struct SslService<'a, T: Transport> {
    client: &'a NamecheapClient<T>,
}

impl<'a, T: Transport> SslService<'a, T> {
    pub fn new(client: &'a NamecheapClient<T>) -> Self {
        Self { client }
    }

    /// Buys a certificate of `certificate_type` (`PositiveSSL`, `EssentialSSL`, ...).
    pub async fn create(
        &self,
        certificate_type: &str,
        years: u32,
        sans_to_add: Option<u32>,
        promotion_code: Option<&str>,
    ) -> ApiResponse {
        let params = RequestParams::new()
            .with("Type", certificate_type)
            .with("Years", years)
            .with_opt("SANStoADD", sans_to_add)
            .with_opt("PromotionCode", promotion_code);
        self.checked(CREATE, params, &["Type"], CallOptions::default())
            .await
    }

    pub async fn get_list(
        &self,
        list_type: Option<&str>,
        search_term: Option<&str>,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ApiResponse {
        let params = RequestParams::new()
            .with_opt("ListType", list_type)
            .with_opt("SearchTerm", search_term)
            .with_opt("Page", page)
            .with_opt("PageSize", page_size);
        self.client.call(GET_LIST, params).await
    }

    pub async fn parse_csr(&self, csr: &str, certificate_type: Option<&str>) -> ApiResponse {
        let params = RequestParams::new()
            .with("csr", csr)
            .with_opt("CertificateType", certificate_type);
        self.checked(PARSE_CSR, params, &["csr"], CallOptions::post())
            .await
    }

    pub async fn get_approver_email_list(
        &self,
        domain: &str,
        certificate_type: &str,
    ) -> ApiResponse {
        let params = RequestParams::new()
            .with("DomainName", domain)
            .with("CertificateType", certificate_type);
        self.checked(
            GET_APPROVER_EMAIL_LIST,
            params,
            &["DomainName", "CertificateType"],
            CallOptions::default(),
        )
        .await
    }

    /// Not supported by this client; answers locally.
    pub async fn activate(&self, _params: RequestParams) -> ApiResponse {
        not_implemented_response(ACTIVATE)
    }

    pub async fn resend_approver_email(&self, certificate_id: u64) -> ApiResponse {
        let params = RequestParams::new().with("CertificateID", certificate_id);
        self.client.call(RESEND_APPROVER_EMAIL, params).await
    }

    pub async fn get_info(&self, certificate_id: u64, return_certificate: bool) -> ApiResponse {
        let mut params = RequestParams::new().with("CertificateID", certificate_id);
        if return_certificate {
            params.set("Returncertificate", "true").set("Returntype", "Individual");
        }
        self.client.call(GET_INFO, params).await
    }

    pub async fn renew(
        &self,
        certificate_id: u64,
        certificate_type: &str,
        years: u32,
        promotion_code: Option<&str>,
    ) -> ApiResponse {
        let params = RequestParams::new()
            .with("CertificateID", certificate_id)
            .with("SSLType", certificate_type)
            .with("Years", years)
            .with_opt("PromotionCode", promotion_code);
        self.checked(RENEW, params, &["SSLType"], CallOptions::default())
            .await
    }

    /// Not supported by this client; answers locally.
    pub async fn reissue(&self, _params: RequestParams) -> ApiResponse {
        not_implemented_response(REISSUE)
    }

    pub async fn resend_fulfillment_email(&self, certificate_id: u64) -> ApiResponse {
        let params = RequestParams::new().with("CertificateID", certificate_id);
        self.client.call(RESEND_FULFILLMENT_EMAIL, params).await
    }

    pub async fn purchase_more_sans(&self, certificate_id: u64, sans_to_add: u32) -> ApiResponse {
        let params = RequestParams::new()
            .with("CertificateID", certificate_id)
            .with("NumberOfSANSToAdd", sans_to_add);
        self.client.call(PURCHASE_MORE_SANS, params).await
    }

    pub async fn revoke_certificate(
        &self,
        certificate_id: u64,
        certificate_type: &str,
    ) -> ApiResponse {
        let params = RequestParams::new()
            .with("CertificateID", certificate_id)
            .with("CertificateType", certificate_type);
        self.checked(
            REVOKE_CERTIFICATE,
            params,
            &["CertificateType"],
            CallOptions::default(),
        )
        .await
    }

    /// `dcv_method` is `HTTP`, `CNAME` or an approver email address.
    pub async fn edit_dcv_method(&self, certificate_id: u64, dcv_method: &str) -> ApiResponse {
        let params = RequestParams::new()
            .with("CertificateID", certificate_id)
            .with("DCVMethod", dcv_method);
        self.checked(EDIT_DCV_METHOD, params, &["DCVMethod"], CallOptions::default())
            .await
    }

    async fn checked(
        &self,
        command: &str,
        params: RequestParams,
        required: &[&str],
        options: CallOptions,
    ) -> ApiResponse {
        if let Some(response) = require(command, &params, required) {
            return response;
        }
        self.client.call_with(command, params, options).await
    }
}
