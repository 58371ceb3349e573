use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        clients::{ClientList, GetOrCreateClientRequest},
        evidence::{EvidenceList, UploadEvidenceRequest},
        history::HistoryList,
        prices::{AveragePrice, ComparisonList, PriceList, RegisterPriceRequest},
        products,
        skus::{CreateSkuRequest, SkuList},
    },
    entity::price_history::ChangeType,
    models::{
        Client, ComparisonCell, ComparisonRow, Competitor, Evidence, HistoryEntry, PriceWithDetails,
        Product, Sku, User,
    },
    response::{ApiResponse, Meta},
    routes::{
        auth, clients, competitors, evidence, export, health, history, params,
        prices as price_routes, products as product_routes, skus,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
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

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        product_routes::list_products,
        product_routes::create_product,
        product_routes::get_product,
        product_routes::update_product,
        product_routes::delete_product,
        competitors::list_competitors,
        price_routes::list_all_prices,
        price_routes::list_prices_by_product,
        price_routes::register_price,
        price_routes::delete_price,
        price_routes::get_comparison,
        price_routes::get_average,
        history::list_history,
        export::comparison_pdf,
        export::comparison_excel,
        export::history_pdf,
        export::history_excel,
        clients::list_clients,
        clients::get_or_create_client,
        skus::list_skus_by_client,
        skus::create_sku,
        skus::delete_sku,
        evidence::list_evidence_by_client,
        evidence::upload_evidence,
        evidence::delete_evidence
    ),
    components(
        schemas(
            User,
            Product,
            Competitor,
            ChangeType,
            HistoryEntry,
            PriceWithDetails,
            ComparisonCell,
            ComparisonRow,
            Client,
            Sku,
            Evidence,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            products::CreateProductRequest,
            products::UpdateProductRequest,
            RegisterPriceRequest,
            AveragePrice,
            GetOrCreateClientRequest,
            CreateSkuRequest,
            UploadEvidenceRequest,
            products::ProductList,
            competitors::CompetitorList,
            PriceList,
            ComparisonList,
            HistoryList,
            ClientList,
            SkuList,
            EvidenceList,
            params::Pagination,
            params::ProductQuery,
            params::ProductSortBy,
            params::SortOrder,
            params::HistoryQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<products::ProductList>,
            ApiResponse<ComparisonList>,
            ApiResponse<HistoryList>,
            ApiResponse<AveragePrice>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Competitors", description = "Fixed competitor reference data"),
        (name = "Prices", description = "Current prices and the comparison matrix"),
        (name = "History", description = "Price change audit trail"),
        (name = "Export", description = "PDF and Excel report downloads"),
        (name = "Clients", description = "Client endpoints"),
        (name = "SKUs", description = "Client SKU endpoints"),
        (name = "Evidence", description = "Client evidence endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
